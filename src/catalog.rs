use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::Deserialize;
use std::error::Error;

static PARAGRAPH_DIR: Dir = include_dir!("src/paragraphs");

/// Difficulty tier a sample paragraph is drawn from
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    pub fn from_name(name: &str) -> Option<Tier> {
        match name.to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "medium" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    fn file_name(&self) -> String {
        format!("{}.json", self.to_string().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paragraph {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TierFile {
    name: String,
    size: u32,
    paragraphs: Vec<Paragraph>,
}

/// The full paragraph set, embedded in the binary and validated up front so
/// that picking from a tier can never fail at runtime.
#[derive(Debug, Clone)]
pub struct Catalog {
    easy: Vec<Paragraph>,
    medium: Vec<Paragraph>,
    hard: Vec<Paragraph>,
}

impl Catalog {
    pub fn load() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            easy: read_tier_from_file(Tier::Easy)?,
            medium: read_tier_from_file(Tier::Medium)?,
            hard: read_tier_from_file(Tier::Hard)?,
        })
    }

    pub fn tier(&self, tier: Tier) -> &[Paragraph] {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    /// Uniform pick over the tier's list. Consecutive picks may repeat.
    pub fn pick(&self, tier: Tier) -> Paragraph {
        let list = self.tier(tier);
        let idx = rand::thread_rng().gen_range(0..list.len());
        list[idx].clone()
    }
}

fn read_tier_from_file(tier: Tier) -> Result<Vec<Paragraph>, Box<dyn Error>> {
    let file_name = tier.file_name();
    let file = PARAGRAPH_DIR
        .get_file(&file_name)
        .ok_or_else(|| format!("paragraph file not found: {file_name}"))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| format!("paragraph file is not valid utf-8: {file_name}"))?;

    let parsed: TierFile = serde_json::from_str(contents)?;

    let expected_name = tier.to_string().to_lowercase();
    if parsed.name != expected_name {
        return Err(format!(
            "tier file {file_name} is named {:?}, expected {:?}",
            parsed.name, expected_name
        )
        .into());
    }
    if parsed.paragraphs.is_empty() {
        return Err(format!("tier {expected_name} has no paragraphs").into());
    }
    if parsed.paragraphs.len() as u32 != parsed.size {
        return Err(format!(
            "tier {expected_name} declares size {} but contains {} paragraphs",
            parsed.size,
            parsed.paragraphs.len()
        )
        .into());
    }

    Ok(parsed.paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_load() {
        let catalog = Catalog::load().expect("embedded catalog should validate");

        for tier in Tier::ALL {
            assert!(!catalog.tier(tier).is_empty());
        }
    }

    #[test]
    fn test_paragraph_texts_are_nonempty() {
        let catalog = Catalog::load().unwrap();

        for tier in Tier::ALL {
            for paragraph in catalog.tier(tier) {
                assert!(!paragraph.text.trim().is_empty());
            }
        }
    }

    #[test]
    fn test_pick_returns_member_of_tier() {
        let catalog = Catalog::load().unwrap();

        for tier in Tier::ALL {
            let picked = catalog.pick(tier);
            assert!(catalog.tier(tier).contains(&picked));
        }
    }

    #[test]
    fn test_pick_varies_over_many_draws() {
        let catalog = Catalog::load().unwrap();

        let first = catalog.pick(Tier::Easy);
        let saw_other = (0..200).any(|_| catalog.pick(Tier::Easy) != first);
        assert!(saw_other, "200 uniform draws over 5 entries never varied");
    }

    #[test]
    fn test_tier_from_name() {
        assert_eq!(Tier::from_name("easy"), Some(Tier::Easy));
        assert_eq!(Tier::from_name("Medium"), Some(Tier::Medium));
        assert_eq!(Tier::from_name("HARD"), Some(Tier::Hard));
        assert_eq!(Tier::from_name("impossible"), None);
    }

    #[test]
    fn test_tier_name_roundtrip() {
        for tier in Tier::ALL {
            let name = tier.to_string().to_lowercase();
            assert_eq!(Tier::from_name(&name), Some(tier));
        }
    }

    #[test]
    fn test_tier_file_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 2,
            "paragraphs": [
                { "text": "one short sample" },
                { "text": "another short sample" }
            ]
        }
        "#;

        let parsed: TierFile = serde_json::from_str(json_data).unwrap();

        assert_eq!(parsed.name, "test");
        assert_eq!(parsed.size, 2);
        assert_eq!(parsed.paragraphs.len(), 2);
        assert_eq!(parsed.paragraphs[0].text, "one short sample");
    }
}
