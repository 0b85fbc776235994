use std::fs;
use std::io;
use std::path::Path;

use rand::seq::SliceRandom;

use super::ArtworkId;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// The reference artworks available in one directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<ArtworkId>,
}

impl Catalog {
    /// Lists image files directly inside `root`, sorted by name.
    pub fn scan(root: &Path) -> io::Result<Self> {
        let mut entries: Vec<ArtworkId> = fs::read_dir(root)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_image_extension(path))
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(ArtworkId::new)
            })
            .collect();
        entries.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        log::debug!("Found {} artworks in {}", entries.len(), root.display());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ArtworkId] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picks one artwork uniformly at random.
    pub fn pick_random(&self) -> Option<&ArtworkId> {
        self.entries.choose(&mut rand::thread_rng())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Derives a display title from an artwork file name.
///
/// `henri-matisse.the-snail.jpg` becomes `Henri Matisse The Snail`.
pub fn title_for(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_name);
    let stem = match name.rsplit_once('.') {
        Some((stem, ext)) if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {
            stem
        }
        _ => name,
    };

    stem.split(['-', '.'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
