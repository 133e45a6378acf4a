use crate::schema::{BilingualText, FromRecord, RecordReader};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// Site pages

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    About,
    Services,
    Projects,
    Products,
    Contact,
    Partner,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Index,
        Page::About,
        Page::Services,
        Page::Projects,
        Page::Products,
        Page::Contact,
        Page::Partner,
    ];

    /// Accepts `about`, `about.html` and `index` style names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim_matches('/');
        let name = name.strip_suffix(".html").unwrap_or(name);
        Self::ALL.into_iter().find(|p| p.name() == name || (name.is_empty() && *p == Page::Index))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::About => "about",
            Page::Services => "services",
            Page::Projects => "projects",
            Page::Products => "products",
            Page::Contact => "contact",
            Page::Partner => "partner",
        }
    }

    pub fn template_file(&self) -> String {
        format!("{}.html", self.name())
    }

    /// Key of this page's section in `cta.json`.
    pub fn cta_key(&self) -> Option<&'static str> {
        match self {
            Page::Index => Some("home"),
            Page::About => Some("about"),
            Page::Services => Some("services"),
            Page::Projects => Some("projects"),
            Page::Products => Some("products"),
            Page::Contact => Some("contact"),
            Page::Partner => None,
        }
    }
}

// Content records

#[derive(Debug, Clone, PartialEq)]
pub struct HomeContent {
    pub hero_title: Option<BilingualText>,
    pub hero_subtitle: Option<BilingualText>,
    pub stats: Option<Stats>,
    pub why_choose: Option<WhyChoose>,
    pub client_logos: Vec<ClientLogo>,
}

impl FromRecord for HomeContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            hero_title: r.text("hero_title"),
            hero_subtitle: r.text("hero_subtitle"),
            stats: r.object("stats", Stats::read),
            why_choose: r.object("why_choose", WhyChoose::read),
            client_logos: r.list("client_logos", ClientLogo::read),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub engineers: String,
    pub projects: String,
    pub support: String,
    pub years: String,
}

impl FromRecord for Stats {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            engineers: r.required_str("engineers"),
            projects: r.required_str("projects"),
            support: r.required_str("support"),
            years: r.required_str("years"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhyChoose {
    pub image: Option<String>,
    pub features: Vec<Feature>,
}

impl FromRecord for WhyChoose {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            image: r.str("image"),
            features: r.list("features", Feature::read),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub title: BilingualText,
    pub description: BilingualText,
}

impl FromRecord for Feature {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            title: r.required_text("title"),
            description: r.text("description").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientLogo {
    pub name: String,
    pub logo: String,
}

impl FromRecord for ClientLogo {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            name: r.str("name").unwrap_or_default(),
            logo: r.required_str("logo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutContent {
    pub story: Option<BilingualText>,
    pub story_image: Option<String>,
    pub mission: Option<BilingualText>,
    pub vision: Option<BilingualText>,
    pub founder: Option<Founder>,
    pub certifications: Option<Certifications>,
}

impl FromRecord for AboutContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            story: r.text("story"),
            story_image: r.str("story_image"),
            mission: r.text("mission"),
            vision: r.text("vision"),
            founder: r.object("founder", Founder::read),
            certifications: r.object("certifications", Certifications::read),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Founder {
    pub name: BilingualText,
    pub title: Option<BilingualText>,
    pub image: Option<String>,
    pub bio: Option<BilingualText>,
}

impl FromRecord for Founder {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            name: r.required_text("name"),
            title: r.text("title"),
            image: r.str("image"),
            bio: r.text("bio"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Certifications {
    pub title: Option<BilingualText>,
    pub subtitle: Option<BilingualText>,
    pub items: Vec<Certification>,
}

impl FromRecord for Certifications {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            title: r.text("title"),
            subtitle: r.text("subtitle"),
            items: r.list("items", Certification::read),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Certification {
    pub image: String,
    pub name: Option<BilingualText>,
}

impl FromRecord for Certification {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            image: r.required_str("image"),
            name: r.text("name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactContent {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<BilingualText>,
    pub google_maps_url: Option<String>,
}

impl FromRecord for ContactContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            phone: r.str("phone"),
            email: r.str("email"),
            address: r.text("address"),
            google_maps_url: r.str("google_maps_url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaContent {
    pub background_image: Option<String>,
    pub title: BilingualText,
    pub text: BilingualText,
    pub primary: CtaButton,
    pub secondary: Option<CtaButton>,
}

impl FromRecord for CtaContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            background_image: r.str("background_image"),
            title: r.required_text("title"),
            text: r.required_text("text"),
            primary: CtaButton::read_required(r, "button1"),
            secondary: CtaButton::read(r, "button2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CtaButton {
    pub link: String,
    pub text: BilingualText,
}

impl CtaButton {
    fn link(r: &RecordReader<'_>, prefix: &str) -> String {
        r.str(&format!("{}_link", prefix)).unwrap_or_else(|| "#".to_string())
    }

    fn read(r: &RecordReader<'_>, prefix: &str) -> Option<Self> {
        let text = r.text(&format!("{}_text", prefix))?;
        Some(Self {
            link: Self::link(r, prefix),
            text,
        })
    }

    fn read_required(r: &mut RecordReader<'_>, prefix: &str) -> Self {
        Self {
            text: r.required_text(&format!("{}_text", prefix)),
            link: Self::link(r, prefix),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerContent {
    pub title: BilingualText,
    pub subtitle: BilingualText,
    pub intro_title: Option<BilingualText>,
    pub intro_text: Option<BilingualText>,
    pub form_title: Option<BilingualText>,
    pub form_desc: Option<BilingualText>,
}

impl FromRecord for PartnerContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            title: r.required_text("title"),
            subtitle: r.required_text("subtitle"),
            intro_title: r.text("intro_title"),
            intro_text: r.text("intro_text"),
            form_title: r.text("form_title"),
            form_desc: r.text("form_desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroSlides {
    pub slides: Vec<Slide>,
}

impl FromRecord for HeroSlides {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            slides: r.list("slides", Slide::read),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub image: String,
    pub alt: Option<String>,
}

impl FromRecord for Slide {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            image: r.required_str("image"),
            alt: r.str("alt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceContent {
    pub name: Option<BilingualText>,
    pub image: Option<String>,
}

impl FromRecord for ServiceContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            name: r.text("name"),
            image: r.str("image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductContent {
    pub brand: String,
    pub logo: Option<String>,
    pub category: Option<String>,
    pub description: Option<BilingualText>,
}

impl FromRecord for ProductContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            brand: r.required_str("brand"),
            logo: r.str("logo"),
            category: r.str("category"),
            description: r.text("description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContent {
    pub title: BilingualText,
    pub description: Option<BilingualText>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl FromRecord for ProjectContent {
    fn read(r: &mut RecordReader<'_>) -> Self {
        Self {
            title: r.required_text("title"),
            description: r.text("description"),
            category: r.str("category"),
            image: r.str("image"),
        }
    }
}

/// `content/project-index.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIndex {
    pub projects: Vec<String>,
}

// App Configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default)]
    pub content_url: Option<String>,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    #[serde(default = "default_languages_dir")]
    pub languages_dir: PathBuf,
    #[serde(default = "default_slider_interval_secs")]
    pub slider_interval_secs: u64,
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.slider_interval_secs == 0 {
            anyhow::bail!("SLIDER_INTERVAL_SECS must be greater than zero");
        }
        if let Some(url) = &self.content_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("CONTENT_URL must start with http:// or https://");
            }
        }
        Ok(())
    }

    pub fn slider_interval(&self) -> Duration {
        Duration::from_secs(self.slider_interval_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            content_dir: default_content_dir(),
            content_url: None,
            templates_dir: default_templates_dir(),
            assets_dir: default_assets_dir(),
            languages_dir: default_languages_dir(),
            slider_interval_secs: default_slider_interval_secs(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_languages_dir() -> PathBuf {
    PathBuf::from("languages")
}

fn default_slider_interval_secs() -> u64 {
    5
}
