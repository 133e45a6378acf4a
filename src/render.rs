//! Builders for repeated fragments: gallery cards, product cards, hero
//! slides, and the lightbox overlays opened from them.

use crate::binder::{self, bilingual};
use crate::dom::Element;
use crate::i18n::I18n;
use crate::language::Language;
use crate::models::{
    Certification, ClientLogo, CtaButton, Feature, ProductContent, ProjectContent, Slide,
};
use crate::schema::BilingualText;
use crate::slider::{SlideDeck, ACTIVE};

pub const PRODUCT_CATEGORIES: [&str; 3] = ["elevators", "hvac", "waterworks"];

const COVER_STYLE: &str = "width: 100%; height: 100%; object-fit: cover;";
const PLACEHOLDER_STYLE: &str =
    "width: 100%; height: 100%; background: linear-gradient(135deg, #F5B700, #2C2C2C);";

/// A rendered item together with the record it was rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem<T> {
    pub key: String,
    pub record: T,
}

fn category_text(i18n: &I18n, category: &str) -> BilingualText {
    BilingualText {
        en: i18n.category_name(category, Language::En),
        sq: i18n.category_name(category, Language::Sq),
    }
}

pub fn project_card(item: &GalleryItem<ProjectContent>, lang: Language, i18n: &I18n) -> Element {
    let project = &item.record;
    let mut card = Element::new("a")
        .with_class("gallery-item show")
        .with_attr("href", &format!("?open={}", item.key))
        .with_attr("style", "cursor: pointer;");
    if let Some(category) = &project.category {
        card.set_attr("data-category", category);
    }

    match &project.image {
        Some(src) => card.append(binder::image(src, &project.title.en, COVER_STYLE)),
        None => card.append(
            Element::new("div")
                .with_class("image-placeholder")
                .with_attr("style", PLACEHOLDER_STYLE),
        ),
    }

    let mut overlay = Element::new("div").with_class("gallery-overlay");
    overlay.append(bilingual("div", &project.title, lang).with_class("gallery-title"));
    if let Some(category) = &project.category {
        overlay.append(bilingual("div", &category_text(i18n, category), lang).with_class("gallery-category"));
    }
    card.append(overlay);
    card
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectGallery {
    items: Vec<GalleryItem<ProjectContent>>,
}

impl ProjectGallery {
    pub fn new(items: Vec<GalleryItem<ProjectContent>>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[GalleryItem<ProjectContent>] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the grid's fallback cards, one card per project in order.
    pub fn render(&self, grid: &mut Element, lang: Language, i18n: &I18n) {
        grid.clear();
        for item in &self.items {
            grid.append(project_card(item, lang, i18n));
        }
    }

    pub fn open(&self, key: &str) -> Option<&ProjectContent> {
        self.items.iter().find(|i| i.key == key).map(|i| &i.record)
    }
}

pub fn product_card(item: &GalleryItem<ProductContent>, lang: Language) -> Element {
    let product = &item.record;
    let logo = match &product.logo {
        Some(src) => Element::new("a").with_attr("href", &format!("?view={}", item.key)).with_child(
            binder::image(src, &product.brand, "cursor: pointer;").with_class("product-brand-logo"),
        ),
        None => Element::new("div")
            .with_class("product-logo-placeholder")
            .with_text(&product.brand),
    };

    let mut card = Element::new("div")
        .with_class("product-card")
        .with_child(Element::new("div").with_class("product-logo").with_child(logo))
        .with_child(Element::new("h3").with_text(&product.brand));
    if let Some(description) = &product.description {
        card.append(bilingual("p", description, lang));
    }
    card
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    items: Vec<GalleryItem<ProductContent>>,
}

impl ProductCatalog {
    pub fn new(items: Vec<GalleryItem<ProductContent>>) -> Self {
        Self { items }
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a GalleryItem<ProductContent>> {
        self.items
            .iter()
            .filter(move |i| i.record.category.as_deref() == Some(category))
    }

    /// The n-th `.products-grid` receives the n-th category. Every grid is
    /// cleared, including ones with no matching products.
    pub fn render(&self, root: &mut Element, lang: Language) {
        root.for_each_mut(".products-grid", |grid| grid.clear());
        for (index, category) in PRODUCT_CATEGORIES.iter().enumerate() {
            let cards: Vec<Element> = self.in_category(category).map(|item| product_card(item, lang)).collect();
            if let Some(grid) = root.query_nth_mut(".products-grid", index) {
                for card in cards {
                    grid.append(card);
                }
            }
        }
    }

    pub fn logo(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.key == key)
            .and_then(|i| i.record.logo.as_deref())
    }
}

/// Rebuilds the slider container; the slide at `deck.current()` is active.
pub fn hero_slides(container: &mut Element, slides: &[Slide], deck: &SlideDeck, default_alt: &str) {
    container.clear();
    for slide in slides {
        let alt = slide.alt.as_deref().unwrap_or(default_alt);
        container.append(
            Element::new("div")
                .with_class("hero-slide")
                .with_child(binder::image(&slide.image, alt, "")),
        );
    }
    deck.apply(container);
}

pub fn feature_item(feature: &Feature, lang: Language) -> Element {
    let content = Element::new("div")
        .with_class("feature-content")
        .with_child(bilingual("h4", &feature.title, lang))
        .with_child(bilingual("p", &feature.description, lang));
    Element::new("div")
        .with_class("feature-item")
        .with_child(Element::new("div").with_class("feature-icon").with_text("✓"))
        .with_child(content)
}

pub fn client_logo(client: &ClientLogo) -> Element {
    Element::new("div").with_class("client-logo").with_child(binder::image(
        &client.logo,
        &client.name,
        "max-width: 100%; max-height: 100%; object-fit: contain;",
    ))
}

pub fn cert_item(cert: &Certification, lang: Language) -> Element {
    let name = cert.name.clone().unwrap_or_default();
    let mut item = Element::new("div").with_class("cert-item").with_child(binder::image(
        &cert.image,
        &name.en,
        "width: 100%; height: 100%; object-fit: contain; border-radius: 8px;",
    ));
    if cert.name.is_some() {
        item.set_attr("title", name.get(lang));
    }
    item
}

pub fn cta_button(button: &CtaButton, class: &str, lang: Language) -> Element {
    bilingual("a", &button.text, lang)
        .with_attr("href", &button.link)
        .with_class(class)
}

pub fn map_iframe(embed: &str) -> Element {
    Element::new("iframe")
        .with_attr("src", &binder::map_embed_src(embed))
        .with_attr("width", "100%")
        .with_attr("height", "100%")
        .with_attr("style", "border:0;")
        .with_attr("allowfullscreen", "")
        .with_attr("loading", "lazy")
        .with_attr("referrerpolicy", "no-referrer-when-downgrade")
}

fn lock_scroll(root: &mut Element) {
    if let Some(body) = root.query_mut("body") {
        body.set_style("overflow", "hidden");
    }
}

/// Fills the project detail overlay from `project` and shows it.
pub fn open_project_lightbox(root: &mut Element, project: &ProjectContent, lang: Language, i18n: &I18n) -> bool {
    let Some(lightbox) = root.query_mut(".project-lightbox") else {
        return false;
    };

    if let Some(img) = lightbox.query_mut(".lightbox-img") {
        match &project.image {
            Some(src) => {
                img.set_attr("src", src);
                img.set_attr("alt", &project.title.en);
                img.set_style("display", "block");
            }
            None => img.set_style("display", "none"),
        }
    }

    binder::bind_text(lightbox.query_mut(".lightbox-title"), &project.title, lang);
    binder::bind_optional(lightbox.query_mut(".lightbox-description"), project.description.as_ref(), lang);
    if let Some(category) = &project.category {
        binder::bind_text(lightbox.query_mut(".lightbox-category"), &category_text(i18n, category), lang);
    }

    lightbox.add_class(ACTIVE);
    lock_scroll(root);
    true
}

/// Shows a single enlarged image in the plain lightbox.
pub fn open_image_lightbox(root: &mut Element, src: &str) -> bool {
    let Some(lightbox) = root.query_mut(".lightbox") else {
        return false;
    };
    let Some(img) = lightbox.query_mut(".lightbox-img") else {
        return false;
    };
    img.set_attr("src", src);
    lightbox.add_class(ACTIVE);
    lock_scroll(root);
    true
}

/// Marks the matching `.filter-btn` active and hides gallery cards outside
/// `filter`. `all` shows every card. Returns the number of visible cards.
pub fn apply_gallery_filter(root: &mut Element, filter: &str) -> usize {
    root.for_each_mut(".filter-btn", |button| {
        let active = button.attr("data-filter") == Some(filter);
        button.toggle_class(ACTIVE, active);
    });

    let mut visible = 0;
    root.for_each_mut(".gallery-item", |item| {
        if filter == "all" || item.attr("data-category") == Some(filter) {
            item.add_class("show");
            item.set_style("display", "");
            visible += 1;
        } else {
            item.remove_class("show");
            item.set_style("display", "none");
        }
    });
    visible
}
