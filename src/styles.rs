use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// One entry of the visual style catalog. Styles are referenced by id in
/// requests and resolved to display names when building prompts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StyleTag {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

macro_rules! style {
    ($id:expr, $name:expr, $category:expr) => {
        StyleTag {
            id: $id,
            name: $name,
            category: $category,
        }
    };
}

/// The authoritative style catalog. Every component resolves names against
/// this table; there is intentionally no second copy anywhere.
pub static STYLE_TAGS: &[StyleTag] = &[
    // Photography
    style!("photo-realistic", "Realistic Photography", "Photography"),
    style!("photo-portrait", "Portrait Photography", "Photography"),
    style!("photo-landscape", "Landscape Photography", "Photography"),
    style!("photo-street", "Street Photography", "Photography"),
    style!("photo-macro", "Macro Photography", "Photography"),
    // Traditional art
    style!("art-watercolor", "Watercolor Painting", "Traditional Art"),
    style!("art-acrylic", "Acrylic Painting", "Traditional Art"),
    style!("art-oil", "Oil Painting", "Traditional Art"),
    style!("art-charcoal", "Charcoal Drawing", "Traditional Art"),
    style!("art-pencil", "Pencil Sketch", "Traditional Art"),
    // Digital art
    style!("3d-model", "3D Model", "Digital Art"),
    style!("digital-painting", "Digital Painting", "Digital Art"),
    style!("pixel-art", "Pixel Art", "Digital Art"),
    style!("vector-art", "Vector Art", "Digital Art"),
    style!("concept-art", "Concept Art", "Digital Art"),
    // Abstract
    style!("abstract-geometric", "Geometric Abstract", "Abstract"),
    style!("abstract-fluid", "Fluid Abstract", "Abstract"),
    style!("abstract-minimal", "Minimalist", "Abstract"),
    // Illustration
    style!("illustration-comic", "Comic Style", "Illustration"),
    style!("illustration-anime", "Anime Style", "Illustration"),
    style!("illustration-children", "Children's Book", "Illustration"),
    // Special
    style!("style-vintage", "Vintage", "Special"),
    style!("style-noir", "Film Noir", "Special"),
    style!("style-cyberpunk", "Cyberpunk", "Special"),
    style!("style-steampunk", "Steampunk", "Special"),
    style!("style-vaporwave", "Vaporwave", "Special"),
    style!("style-pop-art", "Pop Art", "Special"),
    style!("style-gothic", "Gothic", "Special"),
    style!("style-surreal", "Surrealism", "Special"),
    // Art movements
    style!("style-pointillism", "Pointillism", "Traditional Art"),
    style!("style-expressionism", "Expressionism", "Traditional Art"),
    style!("style-impressionism", "Impressionism", "Traditional Art"),
    style!("style-dada", "Dada", "Abstract"),
    style!("style-abstract", "Abstract", "Abstract"),
    style!("style-renaissance", "Renaissance", "Traditional Art"),
    style!("style-art-nouveau", "Art Nouveau", "Traditional Art"),
    style!("style-magical-realism", "Magical Realism", "Special"),
    style!("style-romanticism", "Romanticism", "Traditional Art"),
    style!("style-ukiyo-e", "Ukiyo-e", "Traditional Art"),
    style!("style-baroque", "Baroque", "Traditional Art"),
    style!("style-avant-garde", "Avant-garde", "Special"),
    style!("style-cubism", "Cubism", "Abstract"),
    style!("style-bauhaus", "Bauhaus", "Design"),
    // App icons
    style!("icon-flat", "Flat Icon", "App Icons"),
    style!("icon-gradient", "Gradient Icon", "App Icons"),
    style!("icon-3d", "3D Icon", "App Icons"),
    style!("icon-outlined", "Outlined Icon", "App Icons"),
    style!("icon-isometric", "Isometric Icon", "App Icons"),
    style!("icon-duotone", "Duotone Icon", "App Icons"),
    style!("icon-minimalist", "Minimalist Icon", "App Icons"),
    style!("icon-material", "Material Design", "App Icons"),
    style!("icon-skeuomorphic", "Skeuomorphic Icon", "App Icons"),
    style!("icon-neon", "Neon Icon", "App Icons"),
    // Etsy-style illustrations
    style!("etsy-watercolor", "Watercolor Illustration", "Etsy Illustrations"),
    style!("etsy-handcrafted", "Handcrafted Illustration", "Etsy Illustrations"),
    style!("etsy-vintage", "Vintage Illustration", "Etsy Illustrations"),
    style!("etsy-botanical", "Botanical Illustration", "Etsy Illustrations"),
    style!("etsy-folk", "Folk Art Illustration", "Etsy Illustrations"),
    style!("etsy-whimsical", "Whimsical Illustration", "Etsy Illustrations"),
    style!("etsy-rustic", "Rustic Illustration", "Etsy Illustrations"),
    style!("etsy-cutpaper", "Cut Paper Illustration", "Etsy Illustrations"),
    style!("etsy-lineart", "Line Art Illustration", "Etsy Illustrations"),
    style!("etsy-handlettering", "Hand-Lettering", "Etsy Illustrations"),
];

static INDEX: Lazy<HashMap<&'static str, &'static StyleTag>> =
    Lazy::new(|| STYLE_TAGS.iter().map(|tag| (tag.id, tag)).collect());

pub fn all() -> &'static [StyleTag] {
    STYLE_TAGS
}

pub fn find(id: &str) -> Option<&'static StyleTag> {
    INDEX.get(id).copied()
}

/// Resolves a style id to its display name, falling back to the raw id for
/// unknown styles.
pub fn display_name(id: &str) -> &str {
    find(id).map(|tag| tag.name).unwrap_or(id)
}

/// Comma-joined display names for a set of style ids.
pub fn display_names(ids: &[String]) -> String {
    ids.iter()
        .map(|id| display_name(id))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve_to_names() {
        assert_eq!(display_name("photo-realistic"), "Realistic Photography");
        assert_eq!(display_name("style-ukiyo-e"), "Ukiyo-e");
        assert_eq!(find("icon-neon").unwrap().category, "App Icons");
    }

    #[test]
    fn unknown_ids_fall_back_to_raw_id() {
        assert_eq!(display_name("not-a-style"), "not-a-style");
        assert!(find("not-a-style").is_none());
    }

    #[test]
    fn names_are_comma_joined_in_input_order() {
        let ids = vec!["art-oil".to_string(), "custom".to_string()];
        assert_eq!(display_names(&ids), "Oil Painting, custom");
    }

    #[test]
    fn catalog_ids_are_unique() {
        assert_eq!(INDEX.len(), STYLE_TAGS.len());
    }
}
