use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

/// The categories and letters a round is drawn from.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<String>,
}

impl Catalog {
    pub fn new(categories: Vec<String>) -> Self {
        let categories: Vec<String> = categories
            .into_iter()
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty())
            .collect();

        if categories.is_empty() {
            log::error!("Catalog created without categories, defaulting to the built-in list of categories.");
            Catalog::default()
        } else {
            Catalog { categories }
        }
    }

    #[cfg(test)]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn letters() -> impl Iterator<Item = char> {
        'A'..='Z'
    }

    pub fn draw_category<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        // The constructor guarantees at least one category
        self.categories
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "Category".to_string())
    }

    pub fn draw_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
        Catalog::letters().choose(rng).unwrap_or('A')
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            categories: ["Animals", "Foods", "Countries", "Movies", "Jobs", "Adjectives"]
                .iter()
                .map(|category| category.to_string())
                .collect(),
        }
    }
}
