use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use tonal_core::{Color, ColorCache, Error, Result};

use crate::tonal::{Palette, TonalPalette};

use self::Source::{Black, Tone};

/// A semantic slot in a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Primary,
    OnPrimary,
    PrimaryContainer,
    OnPrimaryContainer,
    Secondary,
    OnSecondary,
    SecondaryContainer,
    OnSecondaryContainer,
    Tertiary,
    OnTertiary,
    TertiaryContainer,
    OnTertiaryContainer,
    Error,
    OnError,
    ErrorContainer,
    OnErrorContainer,
    Background,
    OnBackground,
    Surface,
    OnSurface,
    SurfaceVariant,
    OnSurfaceVariant,
    SurfaceTint,
    Outline,
    OutlineVariant,
    Shadow,
    Scrim,
    InverseSurface,
    InverseOnSurface,
    InversePrimary,
}

impl Role {
    pub const COUNT: usize = 30;

    pub const ALL: [Role; Role::COUNT] = [
        Role::Primary,
        Role::OnPrimary,
        Role::PrimaryContainer,
        Role::OnPrimaryContainer,
        Role::Secondary,
        Role::OnSecondary,
        Role::SecondaryContainer,
        Role::OnSecondaryContainer,
        Role::Tertiary,
        Role::OnTertiary,
        Role::TertiaryContainer,
        Role::OnTertiaryContainer,
        Role::Error,
        Role::OnError,
        Role::ErrorContainer,
        Role::OnErrorContainer,
        Role::Background,
        Role::OnBackground,
        Role::Surface,
        Role::OnSurface,
        Role::SurfaceVariant,
        Role::OnSurfaceVariant,
        Role::SurfaceTint,
        Role::Outline,
        Role::OutlineVariant,
        Role::Shadow,
        Role::Scrim,
        Role::InverseSurface,
        Role::InverseOnSurface,
        Role::InversePrimary,
    ];

    /// The camelCase name used in templates and exported maps.
    pub fn name(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::OnPrimary => "onPrimary",
            Role::PrimaryContainer => "primaryContainer",
            Role::OnPrimaryContainer => "onPrimaryContainer",
            Role::Secondary => "secondary",
            Role::OnSecondary => "onSecondary",
            Role::SecondaryContainer => "secondaryContainer",
            Role::OnSecondaryContainer => "onSecondaryContainer",
            Role::Tertiary => "tertiary",
            Role::OnTertiary => "onTertiary",
            Role::TertiaryContainer => "tertiaryContainer",
            Role::OnTertiaryContainer => "onTertiaryContainer",
            Role::Error => "error",
            Role::OnError => "onError",
            Role::ErrorContainer => "errorContainer",
            Role::OnErrorContainer => "onErrorContainer",
            Role::Background => "background",
            Role::OnBackground => "onBackground",
            Role::Surface => "surface",
            Role::OnSurface => "onSurface",
            Role::SurfaceVariant => "surfaceVariant",
            Role::OnSurfaceVariant => "onSurfaceVariant",
            Role::SurfaceTint => "surfaceTint",
            Role::Outline => "outline",
            Role::OutlineVariant => "outlineVariant",
            Role::Shadow => "shadow",
            Role::Scrim => "scrim",
            Role::InverseSurface => "inverseSurface",
            Role::InverseOnSurface => "inverseOnSurface",
            Role::InversePrimary => "inversePrimary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| Error::UnknownRole(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Ramp {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Tone(Ramp, u8),
    Black,
}

const DARK: [(Role, Source); Role::COUNT] = [
    (Role::Primary, Tone(Ramp::Primary, 80)),
    (Role::OnPrimary, Tone(Ramp::Primary, 20)),
    (Role::PrimaryContainer, Tone(Ramp::Primary, 30)),
    (Role::OnPrimaryContainer, Tone(Ramp::Primary, 90)),
    (Role::Secondary, Tone(Ramp::Secondary, 80)),
    (Role::OnSecondary, Tone(Ramp::Secondary, 20)),
    (Role::SecondaryContainer, Tone(Ramp::Secondary, 30)),
    (Role::OnSecondaryContainer, Tone(Ramp::Secondary, 90)),
    (Role::Tertiary, Tone(Ramp::Tertiary, 80)),
    (Role::OnTertiary, Tone(Ramp::Tertiary, 20)),
    (Role::TertiaryContainer, Tone(Ramp::Tertiary, 30)),
    (Role::OnTertiaryContainer, Tone(Ramp::Tertiary, 90)),
    (Role::Error, Tone(Ramp::Error, 80)),
    (Role::OnError, Tone(Ramp::Error, 20)),
    (Role::ErrorContainer, Tone(Ramp::Error, 30)),
    (Role::OnErrorContainer, Tone(Ramp::Error, 90)),
    (Role::Background, Tone(Ramp::Neutral, 10)),
    (Role::OnBackground, Tone(Ramp::Neutral, 90)),
    (Role::Surface, Tone(Ramp::Neutral, 10)),
    (Role::OnSurface, Tone(Ramp::Neutral, 90)),
    (Role::SurfaceVariant, Tone(Ramp::NeutralVariant, 30)),
    (Role::OnSurfaceVariant, Tone(Ramp::NeutralVariant, 80)),
    (Role::SurfaceTint, Tone(Ramp::Primary, 80)),
    (Role::Outline, Tone(Ramp::NeutralVariant, 60)),
    (Role::OutlineVariant, Tone(Ramp::NeutralVariant, 30)),
    (Role::Shadow, Black),
    (Role::Scrim, Black),
    (Role::InverseSurface, Tone(Ramp::Neutral, 90)),
    (Role::InverseOnSurface, Tone(Ramp::Neutral, 20)),
    (Role::InversePrimary, Tone(Ramp::Primary, 40)),
];

const LIGHT: [(Role, Source); Role::COUNT] = [
    (Role::Primary, Tone(Ramp::Primary, 40)),
    (Role::OnPrimary, Tone(Ramp::Primary, 100)),
    (Role::PrimaryContainer, Tone(Ramp::Primary, 90)),
    (Role::OnPrimaryContainer, Tone(Ramp::Primary, 10)),
    (Role::Secondary, Tone(Ramp::Secondary, 40)),
    (Role::OnSecondary, Tone(Ramp::Secondary, 100)),
    (Role::SecondaryContainer, Tone(Ramp::Secondary, 90)),
    (Role::OnSecondaryContainer, Tone(Ramp::Secondary, 10)),
    (Role::Tertiary, Tone(Ramp::Tertiary, 40)),
    (Role::OnTertiary, Tone(Ramp::Tertiary, 100)),
    (Role::TertiaryContainer, Tone(Ramp::Tertiary, 90)),
    (Role::OnTertiaryContainer, Tone(Ramp::Tertiary, 10)),
    (Role::Error, Tone(Ramp::Error, 40)),
    (Role::OnError, Tone(Ramp::Error, 100)),
    (Role::ErrorContainer, Tone(Ramp::Error, 90)),
    (Role::OnErrorContainer, Tone(Ramp::Error, 10)),
    (Role::Background, Tone(Ramp::Neutral, 99)),
    (Role::OnBackground, Tone(Ramp::Neutral, 10)),
    (Role::Surface, Tone(Ramp::Neutral, 99)),
    (Role::OnSurface, Tone(Ramp::Neutral, 10)),
    (Role::SurfaceVariant, Tone(Ramp::NeutralVariant, 90)),
    (Role::OnSurfaceVariant, Tone(Ramp::NeutralVariant, 30)),
    (Role::SurfaceTint, Tone(Ramp::Primary, 40)),
    (Role::Outline, Tone(Ramp::NeutralVariant, 50)),
    (Role::OutlineVariant, Tone(Ramp::NeutralVariant, 80)),
    (Role::Shadow, Black),
    (Role::Scrim, Black),
    (Role::InverseSurface, Tone(Ramp::Neutral, 20)),
    (Role::InverseOnSurface, Tone(Ramp::Neutral, 95)),
    (Role::InversePrimary, Tone(Ramp::Primary, 80)),
];

impl Palette {
    fn ramp(&self, ramp: Ramp) -> &TonalPalette {
        match ramp {
            Ramp::Primary => &self.primary,
            Ramp::Secondary => &self.secondary,
            Ramp::Tertiary => &self.tertiary,
            Ramp::Neutral => &self.neutral,
            Ramp::NeutralVariant => &self.neutral_variant,
            Ramp::Error => &self.error,
        }
    }
}

/// Every role resolved to a color for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheme {
    is_dark: bool,
    palette: Arc<Palette>,
    colors: [Color; Role::COUNT],
}

/// Builds the palette for `seed` and reads off the scheme for one mode.
pub fn generate_scheme(seed: Color, is_dark: bool) -> Scheme {
    Scheme::from_palette(Arc::new(Palette::from_seed(seed)), is_dark)
}

impl Scheme {
    pub fn from_palette(palette: Arc<Palette>, is_dark: bool) -> Self {
        let table = if is_dark { &DARK } else { &LIGHT };
        let mut colors = [Color::BLACK; Role::COUNT];
        for (role, source) in table {
            colors[*role as usize] = match *source {
                Tone(ramp, tone) => palette.ramp(ramp).tone(f32::from(tone)),
                Black => Color::BLACK,
            };
        }
        Self {
            is_dark,
            palette,
            colors,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn get(&self, role: Role) -> Color {
        self.colors[role as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, Color)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }

    /// Role name to `#rrggbb`.
    pub fn to_hex_map(&self) -> BTreeMap<&'static str, String> {
        self.iter().map(|(role, color)| (role.name(), color.to_hex())).collect()
    }

    /// Copy of this scheme with the named roles replaced by user colors.
    /// All role names are checked before any color is parsed.
    pub fn with_overrides<N, S>(&self, cache: &ColorCache, overrides: &[(N, S)]) -> Result<Scheme>
    where
        N: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        let roles = overrides
            .iter()
            .map(|(name, _)| name.as_ref().parse::<Role>())
            .collect::<Result<Vec<_>>>()?;
        let texts: Vec<&str> = overrides.iter().map(|(_, text)| text.as_ref()).collect();

        let mut scheme = self.clone();
        for (role, color) in roles.into_iter().zip(cache.parse_batch(texts.as_slice())) {
            scheme.colors[role as usize] = color?;
        }
        debug!("applied {} overrides to {} scheme", overrides.len(), mode(self.is_dark));
        Ok(scheme)
    }
}

impl Index<Role> for Scheme {
    type Output = Color;

    fn index(&self, role: Role) -> &Color {
        &self.colors[role as usize]
    }
}

fn mode(is_dark: bool) -> &'static str {
    if is_dark {
        "dark"
    } else {
        "light"
    }
}
