//! Helpers shared by the `bookmarket` binary: tracing setup and draft files.
//!
//! A draft file is TOML with the listing fields and image paths relative to
//! the file:
//!
//! ```toml
//! title = "Dune"
//! author = "Herbert"
//! mrp = 500
//! asking_price = 300
//! condition = "Good"
//! age = "1-3 years"
//! category = "Fiction"
//! description = "First edition, spine intact, no markings."
//! location = "Pune"
//! images = ["front.jpg", "back.jpg"]
//! ```

use anyhow::Context;
use bookmarket_core::{AgeBracket, BookCondition, ImageFile, ListingDraft};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prices may be written as TOML numbers or strings; validation parses them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl PriceInput {
    fn into_text(self) -> String {
        match self {
            PriceInput::Integer(n) => n.to_string(),
            PriceInput::Float(n) => n.to_string(),
            PriceInput::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DraftFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    mrp: Option<PriceInput>,
    asking_price: Option<PriceInput>,
    condition: Option<String>,
    age: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    images: Vec<PathBuf>,
}

/// Load a draft file and read its images.
///
/// Condition and age fall back to the form defaults ("Good", "1-3 years").
pub fn load_draft(path: &Path) -> anyhow::Result<ListingDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft file: {}", path.display()))?;
    let file: DraftFile = toml::from_str(&text)
        .with_context(|| format!("Failed to parse draft file: {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let images = file
        .images
        .iter()
        .map(|image| {
            let image_path = base.join(image);
            ImageFile::from_path(&image_path)
                .with_context(|| format!("Failed to read image: {}", image_path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(ListingDraft {
        title: file.title,
        author: file.author,
        mrp: file.mrp.map(PriceInput::into_text).unwrap_or_default(),
        asking_price: file.asking_price.map(PriceInput::into_text).unwrap_or_default(),
        condition: file
            .condition
            .unwrap_or_else(|| BookCondition::default().to_string()),
        age: file.age.unwrap_or_else(|| AgeBracket::default().to_string()),
        category: file.category,
        description: file.description,
        location: file.location,
        images,
    })
}
