use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Numéros rouges, identiques sur les cylindres européen et américain.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

pub const STREET_COUNT: usize = 12;
pub const DOZEN_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Un seul zéro, 37 cases
    #[default]
    European,
    /// Zéro et double zéro, 38 cases
    American,
}

impl Variant {
    pub fn pocket_count(&self) -> usize {
        match self {
            Variant::European => 37,
            Variant::American => 38,
        }
    }

    /// Toutes les cases dans l'ordre du tableau : 0, (00), 1..36.
    pub fn pockets(&self) -> Vec<Pocket> {
        let mut pockets = Vec::with_capacity(self.pocket_count());
        pockets.push(Pocket::ZERO);
        if *self == Variant::American {
            pockets.push(Pocket::DOUBLE_ZERO);
        }
        pockets.extend((1..=36).map(Pocket));
        pockets
    }

    pub fn contains(&self, pocket: Pocket) -> bool {
        pocket != Pocket::DOUBLE_ZERO || *self == Variant::American
    }

    /// L'analyse par transversales n'existe que sur la table européenne.
    pub fn has_streets(&self) -> bool {
        *self == Variant::European
    }

    pub fn parse_pocket(&self, label: &str) -> Result<Pocket> {
        let pocket: Pocket = label.parse()?;
        if !self.contains(pocket) {
            bail!("Case '{}' absente de la roulette {}", pocket, self);
        }
        Ok(pocket)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::European => write!(f, "européenne"),
            Variant::American => write!(f, "américaine"),
        }
    }
}

/// Index du double zéro dans les tableaux de compteurs.
const DOUBLE_ZERO_INDEX: u8 = 37;

/// Case du cylindre : 0, 00 ou un numéro de 1 à 36.
///
/// La valeur interne est l'index de la case (0, 1..36, 37 pour 00) et ne peut
/// être construite que par les constructeurs validés.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pocket(u8);

impl Pocket {
    pub const ZERO: Pocket = Pocket(0);
    pub const DOUBLE_ZERO: Pocket = Pocket(DOUBLE_ZERO_INDEX);

    /// Case d'un numéro du tapis : 0 donne le zéro, 1 à 36 un numéro plein.
    pub fn from_number(n: u8) -> Result<Pocket> {
        if n > 36 {
            bail!("Numéro {} hors limites (0-36)", n);
        }
        Ok(Pocket(n))
    }

    /// Index stable dans un tableau de compteurs : 0 → 0, n → n, 00 → 37.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0 || self.0 == DOUBLE_ZERO_INDEX
    }

    pub fn number(&self) -> Option<u8> {
        if self.is_zero() { None } else { Some(self.0) }
    }

    pub fn color(&self) -> Color {
        match self.number() {
            Some(n) if RED_NUMBERS.contains(&n) => Color::Red,
            Some(_) => Color::Black,
            None => Color::Green,
        }
    }

    pub fn parity(&self) -> Option<Parity> {
        self.number()
            .map(|n| if n % 2 == 1 { Parity::Odd } else { Parity::Even })
    }

    pub fn half(&self) -> Option<Half> {
        self.number()
            .map(|n| if n <= 18 { Half::Low } else { Half::High })
    }

    pub fn dozen(&self) -> Option<Dozen> {
        match self.number()? {
            1..=12 => Some(Dozen::First),
            13..=24 => Some(Dozen::Second),
            _ => Some(Dozen::Third),
        }
    }

    pub fn street(&self) -> Option<Street> {
        self.number().map(|n| Street((n - 1) / 3 + 1))
    }
}

impl std::fmt::Display for Pocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            DOUBLE_ZERO_INDEX => write!(f, "00"),
            n => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for Pocket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "00" => Ok(Pocket::DOUBLE_ZERO),
            other => match other.parse::<u8>() {
                Ok(n) => Pocket::from_number(n),
                Err(_) => bail!("Case invalide : '{}'", other),
            },
        }
    }
}

impl TryFrom<String> for Pocket {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Pocket> for String {
    fn from(pocket: Pocket) -> Self {
        pocket.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
            Color::Green => Color::Green,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "Rouge"),
            Color::Black => write!(f, "Noir"),
            Color::Green => write!(f, "Vert"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Odd => write!(f, "Impair"),
            Parity::Even => write!(f, "Pair"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    Low,
    High,
}

impl std::fmt::Display for Half {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Half::Low => write!(f, "Manque (1-18)"),
            Half::High => write!(f, "Passe (19-36)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dozen {
    First,
    Second,
    Third,
}

impl Dozen {
    pub const ALL: [Dozen; DOZEN_COUNT] = [Dozen::First, Dozen::Second, Dozen::Third];

    pub fn index(&self) -> usize {
        match self {
            Dozen::First => 0,
            Dozen::Second => 1,
            Dozen::Third => 2,
        }
    }
}

impl std::fmt::Display for Dozen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dozen::First => write!(f, "1re douzaine (1-12)"),
            Dozen::Second => write!(f, "2e douzaine (13-24)"),
            Dozen::Third => write!(f, "3e douzaine (25-36)"),
        }
    }
}

/// Transversale pleine : trois numéros consécutifs d'une même ligne du tapis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Street(u8);

impl Street {
    pub fn new(number: u8) -> Result<Self> {
        if number < 1 || number as usize > STREET_COUNT {
            bail!("Transversale {} hors limites (1-12)", number);
        }
        Ok(Street(number))
    }

    pub fn all() -> impl Iterator<Item = Street> {
        (1..=STREET_COUNT as u8).map(Street)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn numbers(&self) -> [u8; 3] {
        let last = self.0 * 3;
        [last - 2, last - 1, last]
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.numbers();
        write!(f, "Transversale {} ({}-{}-{})", self.0, a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket(n: u8) -> Pocket {
        Pocket::from_number(n).unwrap()
    }

    #[test]
    fn test_pocket_count() {
        assert_eq!(Variant::European.pocket_count(), 37);
        assert_eq!(Variant::American.pocket_count(), 38);
        assert_eq!(Variant::European.pockets().len(), 37);
        assert_eq!(Variant::American.pockets().len(), 38);
    }

    #[test]
    fn test_parse_pocket_ok() {
        assert_eq!(Variant::European.parse_pocket("0").unwrap(), Pocket::ZERO);
        assert_eq!(Variant::European.parse_pocket(" 17 ").unwrap(), pocket(17));
        assert_eq!(Variant::American.parse_pocket("00").unwrap(), Pocket::DOUBLE_ZERO);
    }

    #[test]
    fn test_parse_pocket_rejected() {
        assert!(Variant::European.parse_pocket("00").is_err());
        assert!(Variant::European.parse_pocket("37").is_err());
        assert!(Variant::American.parse_pocket("-1").is_err());
        assert!(Variant::American.parse_pocket("rouge").is_err());
        assert!(Variant::American.parse_pocket("").is_err());
    }

    #[test]
    fn test_colors() {
        let reds = Variant::European
            .pockets()
            .iter()
            .filter(|p| p.color() == Color::Red)
            .count();
        let blacks = Variant::European
            .pockets()
            .iter()
            .filter(|p| p.color() == Color::Black)
            .count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
        assert_eq!(Pocket::ZERO.color(), Color::Green);
        assert_eq!(Pocket::DOUBLE_ZERO.color(), Color::Green);
        assert_eq!(pocket(1).color(), Color::Red);
        assert_eq!(pocket(2).color(), Color::Black);
    }

    #[test]
    fn test_zero_has_no_group() {
        for pocket in [Pocket::ZERO, Pocket::DOUBLE_ZERO] {
            assert_eq!(pocket.parity(), None);
            assert_eq!(pocket.half(), None);
            assert_eq!(pocket.dozen(), None);
            assert_eq!(pocket.street(), None);
        }
    }

    #[test]
    fn test_dozens() {
        assert_eq!(pocket(1).dozen(), Some(Dozen::First));
        assert_eq!(pocket(12).dozen(), Some(Dozen::First));
        assert_eq!(pocket(13).dozen(), Some(Dozen::Second));
        assert_eq!(pocket(24).dozen(), Some(Dozen::Second));
        assert_eq!(pocket(25).dozen(), Some(Dozen::Third));
        assert_eq!(Pocket::from_number(36).unwrap().dozen(), Some(Dozen::Third));
    }

    #[test]
    fn test_street_partition() {
        let mut seen = [0u8; 37];
        for street in Street::all() {
            for n in street.numbers() {
                seen[n as usize] += 1;
                assert_eq!(pocket(n).street(), Some(street));
            }
        }
        assert_eq!(seen[0], 0);
        assert!(seen[1..].iter().all(|&c| c == 1));
        assert_eq!(Street::new(1).unwrap().numbers(), [1, 2, 3]);
        assert_eq!(Street::new(12).unwrap().numbers(), [34, 35, 36]);
        assert!(Street::new(0).is_err());
        assert!(Street::new(13).is_err());
    }

    #[test]
    fn test_pocket_index_unique() {
        let mut indices: Vec<usize> = Variant::American.pockets().iter().map(|p| p.index()).collect();
        indices.sort();
        indices.dedup();
        assert_eq!(indices.len(), 38);
        assert!(indices.iter().all(|&i| i < 38));
    }

    #[test]
    fn test_from_number_range() {
        assert_eq!(Pocket::from_number(0).unwrap(), Pocket::ZERO);
        assert_eq!(Pocket::from_number(36).unwrap().number(), Some(36));
        assert!(Pocket::from_number(37).is_err());
        assert!(Pocket::from_number(40).is_err());
        assert!(Pocket::from_number(u8::MAX).is_err());
        // Le zéro construit par numéro n'a ni transversale ni douzaine
        let zero = Pocket::from_number(0).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.street(), None);
        assert_eq!(zero.color(), Color::Green);
    }

    #[test]
    fn test_every_pocket_in_bounds() {
        for pocket in Variant::American.pockets() {
            assert!(pocket.index() < 38);
            if let Some(street) = pocket.street() {
                assert!(street.index() < STREET_COUNT, "{} → {}", pocket, street);
            }
        }
    }

    #[test]
    fn test_pocket_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Pocket>(r#""40""#).is_err());
        assert!(serde_json::from_str::<Pocket>(r#""37""#).is_err());
        assert!(serde_json::from_str::<Pocket>(r#""x""#).is_err());
    }

    #[test]
    fn test_pocket_serde_as_label() {
        let json = serde_json::to_string(&vec![Pocket::DOUBLE_ZERO, pocket(7)]).unwrap();
        assert_eq!(json, r#"["00","7"]"#);
        let restored: Vec<Pocket> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vec![Pocket::DOUBLE_ZERO, pocket(7)]);
    }
}
