use crate::api::ContentClient;
use crate::dom::Element;
use crate::i18n::I18n;
use crate::language::Language;
use crate::models::{
    AboutContent, ContactContent, CtaContent, HeroSlides, HomeContent, Page, PartnerContent,
    ProductContent, ProjectContent, ProjectIndex, ServiceContent,
};
use crate::render::{self, GalleryItem, ProductCatalog, ProjectGallery};
use crate::schema::{self, FromRecord};
use crate::sections;
use crate::slider::HeroSlider;
use futures_util::future::join_all;
use std::path::Path;
use std::sync::Arc;

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;

pub const SERVICE_FILES: [&str; 3] = ["elevators.json", "hvac.json", "waterworks.json"];

pub const PRODUCT_FILES: [&str; 9] = [
    "premium-elevators.json",
    "commercial-solutions.json",
    "escalator-systems.json",
    "climate-control-systems.json",
    "industrial-hvac.json",
    "smart-climate-systems.json",
    "water-distribution.json",
    "fire-protection-systems.json",
    "pumping-systems.json",
];

/// Used when `project-index.json` is missing or unreadable.
pub const DEFAULT_PROJECT_FILES: [&str; 9] = [
    "office-tower-project.json",
    "shopping-mall-hvac.json",
    "municipal-water-system.json",
    "residential-complex.json",
    "hotel-climate-control.json",
    "fire-protection-system.json",
    "hospital-elevator-system.json",
    "industrial-hvac.json",
    "city-water-infrastructure.json",
];

/// Card links carry the key verbatim (`?open=<key>`), so only stems made of
/// ASCII letters, digits, `-`, `_` and `.` are accepted.
pub fn is_link_safe(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn file_key(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
        .to_string()
}

/// What hydration rendered into repeated fragments, kept so a detail view can
/// be opened from the exact record a card was built from.
#[derive(Debug, Default)]
pub struct Hydration {
    pub projects: ProjectGallery,
    pub products: ProductCatalog,
}

pub struct SiteService<C: ContentClient + ?Sized> {
    pub client: Arc<C>,
    pub i18n: I18n,
    pub slider: HeroSlider,
}

impl<C: ContentClient + ?Sized> SiteService<C> {
    pub fn new(client: Arc<C>, i18n: I18n, slider: HeroSlider) -> Self {
        Self { client, i18n, slider }
    }

    /// Fetches and validates one content file. Every failure is logged and
    /// reported as `None`.
    pub async fn fetch<T: FromRecord>(&self, path: &str) -> Option<T> {
        let value = match self.client.fetch_json(path).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error loading {}: {}", path, e);
                return None;
            }
        };
        match schema::validate(path, &value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Ignoring content: {}", e);
                None
            }
        }
    }

    pub async fn fetch_cta(&self, key: &str) -> Option<CtaContent> {
        let value = match self.client.fetch_json("cta.json").await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error loading CTA content: {}", e);
                return None;
            }
        };
        let section = value.get(key)?;
        schema::validate(&format!("cta.json#{}", key), section)
            .map_err(|e| tracing::warn!("Ignoring content: {}", e))
            .ok()
    }

    pub async fn project_files(&self) -> Vec<String> {
        let index = match self.client.fetch_json("project-index.json").await {
            Ok(value) => serde_json::from_value::<ProjectIndex>(value).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match index {
            Ok(index) => index.projects,
            Err(e) => {
                tracing::debug!("Using built-in project list: {}", e);
                DEFAULT_PROJECT_FILES.iter().map(|f| f.to_string()).collect()
            }
        }
    }

    /// Projects in index order; files that fail to load are skipped.
    pub async fn fetch_projects(&self) -> ProjectGallery {
        let files: Vec<String> = self
            .project_files()
            .await
            .into_iter()
            .filter(|file| {
                let safe = is_link_safe(&file_key(file));
                if !safe {
                    tracing::warn!("Skipping project {:?}: name cannot be linked", file);
                }
                safe
            })
            .collect();
        let loads = files.iter().map(|file| async move {
            self.fetch::<ProjectContent>(&format!("projects/{}", file))
                .await
                .map(|record| GalleryItem {
                    key: file_key(file),
                    record,
                })
        });
        ProjectGallery::new(join_all(loads).await.into_iter().flatten().collect())
    }

    pub async fn fetch_products(&self) -> ProductCatalog {
        let loads = PRODUCT_FILES.iter().map(|file| async move {
            self.fetch::<ProductContent>(&format!("products/{}", file))
                .await
                .map(|record| GalleryItem {
                    key: file_key(file),
                    record,
                })
        });
        ProductCatalog::new(join_all(loads).await.into_iter().flatten().collect())
    }

    pub async fn fetch_services(&self) -> Vec<Option<ServiceContent>> {
        let loads = SERVICE_FILES
            .iter()
            .map(|file| async move { self.fetch::<ServiceContent>(&format!("services/{}", file)).await });
        join_all(loads).await
    }

    /// Fetches everything `page` shows, concurrently, then binds it into
    /// `root`. Sections are only loaded when the template has a place for
    /// them; a section whose content is missing keeps its fallback markup.
    pub async fn hydrate(&self, page: Page, root: &mut Element, lang: Language) -> Hydration {
        let has_hero = root.contains(".hero");
        let has_story = root.contains(".company-story");
        let has_gallery = root.contains(".gallery-grid");
        let has_products = root.contains(".products-grid");
        let has_services = root.contains(".service-image");

        let (cta, contact, home, slides, about, partner, services, projects, products) = tokio::join!(
            async {
                match page.cta_key() {
                    Some(key) => self.fetch_cta(key).await,
                    None => None,
                }
            },
            self.fetch::<ContactContent>("contact.json"),
            async {
                if has_hero {
                    self.fetch::<HomeContent>("home.json").await
                } else {
                    None
                }
            },
            async {
                if has_hero {
                    self.fetch::<HeroSlides>("hero-slider.json").await
                } else {
                    None
                }
            },
            async {
                if has_story {
                    self.fetch::<AboutContent>("about.json").await
                } else {
                    None
                }
            },
            async {
                if page == Page::Partner {
                    self.fetch::<PartnerContent>("partner.json").await
                } else {
                    None
                }
            },
            async {
                if page == Page::Services && has_services {
                    self.fetch_services().await
                } else {
                    Vec::new()
                }
            },
            async {
                if has_gallery {
                    Some(self.fetch_projects().await)
                } else {
                    None
                }
            },
            async {
                if has_products {
                    Some(self.fetch_products().await)
                } else {
                    None
                }
            },
        );

        if let Some(cta) = &cta {
            sections::apply_cta(root, cta, lang);
        }
        if let Some(contact) = &contact {
            if page == Page::Contact {
                sections::apply_contact_page(root, contact, lang);
            } else {
                sections::apply_footer_contact(root, contact, lang);
            }
        }
        if let Some(home) = &home {
            sections::apply_home(root, home, lang);
        }
        if let Some(hero) = slides.filter(|s| !s.slides.is_empty()) {
            self.slider.sync(hero.slides.len());
            let default_alt = self.i18n.localize_or("slider.default_alt", lang, "Hero slide");
            if let Some(container) = root.query_mut(".hero-slider") {
                render::hero_slides(container, &hero.slides, &self.slider.deck(), &default_alt);
            }
        }
        if let Some(about) = &about {
            sections::apply_about(root, about, lang);
        }
        if let Some(partner) = &partner {
            sections::apply_partner(root, partner, lang);
        }
        sections::apply_service_images(root, &services);

        let mut hydration = Hydration::default();
        if let Some(gallery) = projects {
            if let Some(grid) = root.query_mut(".gallery-grid") {
                gallery.render(grid, lang, &self.i18n);
            }
            hydration.projects = gallery;
        }
        if let Some(catalog) = products {
            catalog.render(root, lang);
            hydration.products = catalog;
        }

        tracing::debug!("Hydrated {} page", page.name());
        hydration
    }
}
