#[cfg(test)]
mod tests {
    use crate::api::{ContentClient, ContentError};
    use crate::dom::Document;
    use crate::i18n::I18n;
    use crate::language::Language;
    use crate::models::Page;
    use crate::service::SiteService;
    use crate::slider::HeroSlider;
    use async_trait::async_trait;
    use mockall::mock;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    mock! {
        pub ContentClient {}
        #[async_trait]
        impl ContentClient for ContentClient {
            async fn fetch_json(&self, path: &str) -> Result<Value, ContentError>;
        }
    }

    fn mock_i18n() -> I18n {
        I18n::new(Path::new("languages"))
    }

    /// Serves `files` by path; everything else is a 404.
    fn client_with(files: Vec<(&str, Value)>) -> MockContentClient {
        let files: HashMap<String, Value> = files.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        let mut client = MockContentClient::new();
        client.expect_fetch_json().returning(move |path| {
            files.get(path).cloned().ok_or_else(|| ContentError::Status {
                path: path.to_string(),
                status: 404,
            })
        });
        client
    }

    fn service(client: MockContentClient) -> SiteService<MockContentClient> {
        SiteService::new(Arc::new(client), mock_i18n(), HeroSlider::new(Duration::from_secs(5)))
    }

    fn project(title: &str, category: &str) -> Value {
        json!({
            "title_en": title,
            "title_sq": format!("{} SQ", title),
            "description_en": "Description",
            "category": category,
            "image": format!("/assets/{}.jpg", title),
        })
    }

    const HOME: &str = r#"<html><body>
        <section class="hero">
            <div class="hero-slider"><div class="hero-slide active"></div></div>
            <h1 class="hero-title" data-en="Fallback title" data-sq="Titull rezervë">Fallback title</h1>
        </section>
        <section class="cta">
            <h2 class="cta-title">Fallback CTA</h2>
            <p class="cta-text">Fallback text</p>
            <div class="cta-buttons"><a class="btn">Old</a></div>
        </section>
        <footer><ul class="footer-contact">
            <li class="footer-phone">000</li>
            <li class="footer-email">old@example.com</li>
            <li class="footer-address">Old address</li>
        </ul></footer>
    </body></html>"#;

    const GALLERY: &str = r#"<html><body>
        <div class="gallery-grid"><div class="gallery-item">Fallback card</div></div>
    </body></html>"#;

    #[tokio::test]
    async fn test_failed_loads_keep_fallback_content() {
        let mut client = MockContentClient::new();
        client.expect_fetch_json().returning(|path| {
            Err(ContentError::InvalidPath(path.to_string()))
        });
        let service = service(client);

        let mut doc = Document::parse(HOME).unwrap();
        let before = doc.clone();
        let hydration = service.hydrate(Page::Index, &mut doc, Language::En).await;

        assert_eq!(doc, before);
        assert!(hydration.projects.is_empty());
    }

    #[tokio::test]
    async fn test_cta_and_footer_are_bound_in_current_language() {
        let client = client_with(vec![
            (
                "cta.json",
                json!({
                    "home": {
                        "title_en": "Ready to start?",
                        "title_sq": "Gati për të filluar?",
                        "text_en": "Talk to us",
                        "text_sq": "Na kontaktoni",
                        "button1_text_en": "Contact",
                        "button1_text_sq": "Kontakt",
                        "button1_link": "contact.html",
                    },
                    "about": { "title_en": "Other page", "text_en": "Other" }
                }),
            ),
            (
                "contact.json",
                json!({
                    "phone": "+355 69 123 4567",
                    "email": "info@ejona.al",
                    "address_en": "Tirana, Albania",
                    "address_sq": "Tiranë, Shqipëri",
                }),
            ),
        ]);
        let service = service(client);

        let mut doc = Document::parse(HOME).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::Sq).await;

        let title = doc.query(".cta-title").unwrap();
        assert_eq!(title.text(), "Gati për të filluar?");
        assert_eq!(title.attr("data-en"), Some("Ready to start?"));

        let buttons = doc.query_all(".cta-buttons a");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].attr("href"), Some("contact.html"));
        assert_eq!(buttons[0].attr("class"), Some("btn btn-primary"));
        assert_eq!(buttons[0].text(), "Kontakt");

        assert_eq!(doc.query(".footer-phone").unwrap().text(), "+355 69 123 4567");
        assert_eq!(doc.query(".footer-address").unwrap().text(), "Tiranë, Shqipëri");
        // Untouched without home.json.
        assert_eq!(doc.query(".hero-title").unwrap().text(), "Fallback title");
    }

    #[tokio::test]
    async fn test_cta_missing_required_field_is_ignored() {
        let client = client_with(vec![("cta.json", json!({ "home": { "title_en": "No text" } }))]);
        let service = service(client);

        let mut doc = Document::parse(HOME).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::En).await;

        assert_eq!(doc.query(".cta-title").unwrap().text(), "Fallback CTA");
        assert_eq!(doc.query(".cta-buttons a").unwrap().text(), "Old");
    }

    #[tokio::test]
    async fn test_projects_follow_index_order() {
        let client = client_with(vec![
            (
                "project-index.json",
                json!({ "projects": ["c.json", "a.json", "b.json"] }),
            ),
            ("projects/a.json", project("Alpha", "hvac")),
            ("projects/b.json", project("Beta", "elevators")),
            ("projects/c.json", project("Gamma", "waterworks")),
        ]);
        let service = service(client);

        let mut doc = Document::parse(GALLERY).unwrap();
        let hydration = service.hydrate(Page::Projects, &mut doc, Language::En).await;

        let keys: Vec<&str> = hydration.projects.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);

        let titles: Vec<String> = doc
            .query_all(".gallery-item .gallery-title")
            .iter()
            .map(|t| t.text())
            .collect();
        assert_eq!(titles, vec!["Gamma", "Alpha", "Beta"]);
        assert_eq!(doc.query(".gallery-item").unwrap().attr("href"), Some("?open=c"));
        assert_eq!(
            doc.query(".gallery-item .gallery-category").unwrap().text(),
            "Waterworks"
        );
    }

    #[tokio::test]
    async fn test_broken_project_files_are_skipped() {
        let client = client_with(vec![
            (
                "project-index.json",
                json!({ "projects": ["a.json", "missing.json", "untitled.json", "b.json"] }),
            ),
            ("projects/a.json", project("Alpha", "hvac")),
            ("projects/untitled.json", json!({ "category": "hvac" })),
            ("projects/b.json", project("Beta", "hvac")),
        ]);
        let service = service(client);

        let mut doc = Document::parse(GALLERY).unwrap();
        let hydration = service.hydrate(Page::Projects, &mut doc, Language::En).await;

        assert_eq!(hydration.projects.items().len(), 2);
        assert_eq!(doc.count(".gallery-item"), 2);
        assert!(hydration.projects.open("untitled").is_none());
        assert_eq!(hydration.projects.open("b").unwrap().title.en, "Beta");
    }

    #[tokio::test]
    async fn test_missing_index_uses_builtin_project_list() {
        let client = client_with(vec![(
            "projects/office-tower-project.json",
            project("Office Tower", "elevators"),
        )]);
        let service = service(client);

        let gallery = service.fetch_projects().await;
        assert_eq!(gallery.items().len(), 1);
        assert_eq!(gallery.items()[0].key, "office-tower-project");
    }

    #[tokio::test]
    async fn test_products_grouped_by_category_in_file_order() {
        let client = client_with(vec![
            (
                "products/premium-elevators.json",
                json!({ "brand": "Kone", "category": "elevators", "logo": "/assets/kone.png" }),
            ),
            (
                "products/commercial-solutions.json",
                json!({ "brand": "Otis", "category": "elevators" }),
            ),
            (
                "products/industrial-hvac.json",
                json!({ "brand": "Daikin", "category": "hvac", "description_en": "Chillers" }),
            ),
            ("products/pumping-systems.json", json!({ "category": "waterworks" })),
        ]);
        let service = service(client);

        let markup = r#"<html><body>
            <div class="products-grid"><p>fallback</p></div>
            <div class="products-grid"><p>fallback</p></div>
            <div class="products-grid"><p>fallback</p></div>
        </body></html>"#;
        let mut doc = Document::parse(markup).unwrap();
        let hydration = service.hydrate(Page::Products, &mut doc, Language::En).await;

        let grids = doc.query_all(".products-grid");
        let brands = |grid: &crate::dom::Element| -> Vec<String> {
            grid.query_all("h3").iter().map(|h| h.text()).collect()
        };
        assert_eq!(brands(grids[0]), vec!["Kone", "Otis"]);
        assert_eq!(brands(grids[1]), vec!["Daikin"]);
        assert!(brands(grids[2]).is_empty());
        assert_eq!(grids[2].count("p"), 0);

        assert_eq!(hydration.products.logo("premium-elevators"), Some("/assets/kone.png"));
        assert_eq!(hydration.products.logo("commercial-solutions"), None);
        assert!(grids[0].contains(".product-logo-placeholder"));
    }

    #[tokio::test]
    async fn test_sections_without_a_target_are_not_fetched() {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requested);
        let mut client = MockContentClient::new();
        client.expect_fetch_json().returning(move |path| {
            log.lock().unwrap().push(path.to_string());
            Err(ContentError::InvalidPath(path.to_string()))
        });
        let service = service(client);

        let mut doc = Document::parse(GALLERY).unwrap();
        service.hydrate(Page::Projects, &mut doc, Language::En).await;

        let requested = requested.lock().unwrap();
        assert!(requested.contains(&"cta.json".to_string()));
        assert!(requested.contains(&"contact.json".to_string()));
        assert!(requested.contains(&"project-index.json".to_string()));
        for skipped in ["home.json", "hero-slider.json", "about.json", "partner.json"] {
            assert!(!requested.contains(&skipped.to_string()), "{} was fetched", skipped);
        }
        assert!(!requested.iter().any(|p| p.starts_with("products/")));
    }

    #[tokio::test]
    async fn test_hero_slides_rendered_with_single_active() {
        let client = client_with(vec![(
            "hero-slider.json",
            json!({ "slides": [
                { "image": "/assets/hero-1.jpg", "alt": "Tower" },
                { "image": "/assets/hero-2.jpg" },
                { "alt": "no image" },
                { "image": "/assets/hero-3.jpg" },
            ]}),
        )]);
        let service = service(client);

        let mut doc = Document::parse(HOME).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::En).await;

        assert_eq!(doc.count(".hero-slide"), 3);
        assert_eq!(doc.count(".hero-slide.active"), 1);
        let alts: Vec<Option<&str>> = doc.query_all(".hero-slide img").iter().map(|i| i.attr("alt")).collect();
        assert_eq!(alts, vec![Some("Tower"), Some("Hero slide"), Some("Hero slide")]);
        assert_eq!(service.slider.len(), 3);
        assert!(service.slider.is_running());
        service.slider.stop();
    }

    #[tokio::test]
    async fn test_cta_without_primary_button_is_ignored() {
        let client = client_with(vec![(
            "cta.json",
            json!({ "home": {
                "title_en": "Ready?",
                "text_en": "Talk to us",
                "button2_text_en": "Projects",
                "button2_link": "projects.html",
            }}),
        )]);
        let service = service(client);

        let mut doc = Document::parse(HOME).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::En).await;

        assert_eq!(doc.query(".cta-title").unwrap().text(), "Fallback CTA");
        assert_eq!(doc.count(".cta-buttons a"), 1);
    }

    #[tokio::test]
    async fn test_project_names_that_cannot_be_linked_are_skipped() {
        let client = client_with(vec![
            (
                "project-index.json",
                json!({ "projects": ["tower.json", "mall & plaza.json"] }),
            ),
            ("projects/tower.json", project("Tower", "elevators")),
            ("projects/mall & plaza.json", project("Mall", "hvac")),
        ]);
        let service = service(client);

        let gallery = service.fetch_projects().await;
        let keys: Vec<&str> = gallery.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["tower"]);
    }

    const HOME_SECTIONS: &str = r#"<html><body>
        <section class="hero">
            <h1 class="hero-title">Fallback title</h1>
            <p class="hero-subtitle">Fallback subtitle</p>
        </section>
        <div class="stats">
            <span class="stat-number">0</span>
            <span class="stat-number">0</span>
            <span class="stat-number">0</span>
            <span class="stat-number">0</span>
        </div>
        <div class="why-choose-image"><div class="image-placeholder"></div></div>
        <div class="features-list"><div class="feature-item">Fallback</div></div>
        <div class="clients-grid"><div class="client-logo">Fallback</div></div>
    </body></html>"#;

    #[tokio::test]
    async fn test_home_sections_are_bound() {
        let client = client_with(vec![(
            "home.json",
            json!({
                "hero_title_en": "Built to last",
                "hero_title_sq": "Ndërtuar të zgjasë",
                "stats": { "engineers": 45, "projects": "320", "support": "24/7", "years": 14 },
                "why_choose": {
                    "image": "/assets/why.jpg",
                    "features": [
                        { "title_en": "Certified", "title_sq": "Të certifikuar", "description_en": "Licensed" },
                        { "title_en": "Fast", "description_en": "On call" },
                        { "description_en": "No title" },
                    ]
                },
                "client_logos": [
                    { "name": "Kone", "logo": "/assets/clients/kone.png" },
                    { "name": "Broken" },
                    { "logo": "/assets/clients/otis.png" },
                ],
            }),
        )]);
        let service = service(client);

        let mut doc = Document::parse(HOME_SECTIONS).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::Sq).await;

        assert_eq!(doc.query(".hero-title").unwrap().text(), "Ndërtuar të zgjasë");
        assert_eq!(doc.query(".hero-subtitle").unwrap().text(), "Fallback subtitle");

        let stats: Vec<String> = doc.query_all(".stat-number").iter().map(|s| s.text()).collect();
        assert_eq!(stats, vec!["45+", "320+", "24/7", "14+"]);
        assert_eq!(doc.query(".stat-number").unwrap().attr("data-count"), Some("45+"));

        assert_eq!(
            doc.query(".why-choose-image img").unwrap().attr("src"),
            Some("/assets/why.jpg")
        );
        assert_eq!(doc.count(".why-choose-image .image-placeholder"), 0);

        let features: Vec<String> = doc
            .query_all(".features-list .feature-item h4")
            .iter()
            .map(|h| h.text())
            .collect();
        assert_eq!(features, vec!["Të certifikuar", "Fast"]);

        let logos: Vec<(Option<&str>, Option<&str>)> = doc
            .query_all(".clients-grid .client-logo img")
            .iter()
            .map(|img| (img.attr("src"), img.attr("alt")))
            .collect();
        assert_eq!(
            logos,
            vec![
                (Some("/assets/clients/kone.png"), Some("Kone")),
                (Some("/assets/clients/otis.png"), Some("")),
            ]
        );
    }

    #[tokio::test]
    async fn test_stats_need_all_four_counters() {
        let client = client_with(vec![(
            "home.json",
            json!({ "stats": { "engineers": 45, "projects": 320, "support": "24/7", "years": 14 } }),
        )]);
        let service = service(client);

        let markup = r#"<html><body><section class="hero"></section>
            <span class="stat-number">1</span><span class="stat-number">2</span>
        </body></html>"#;
        let mut doc = Document::parse(markup).unwrap();
        service.hydrate(Page::Index, &mut doc, Language::En).await;

        let stats: Vec<String> = doc.query_all(".stat-number").iter().map(|s| s.text()).collect();
        assert_eq!(stats, vec!["1", "2"]);
    }

    const ABOUT: &str = r#"<html><body>
        <section class="company-story">
            <div class="story-text"><div class="text-content"><p>Fallback story</p></div></div>
            <div class="story-image"><div class="image-placeholder"></div></div>
        </section>
        <div class="values-grid">
            <div class="value-card"><h3>Mission</h3><p>Fallback mission</p></div>
            <div class="value-card"><h3>Vision</h3><p>Fallback vision</p></div>
        </div>
        <section class="founder-section" style="display: none;">
            <div class="founder-image"></div>
            <h2 class="founder-name"></h2>
            <p class="founder-title"></p>
            <div class="founder-bio"></div>
        </section>
        <section class="certifications">
            <h2 class="section-title">Certifications</h2>
            <div class="cert-grid"></div>
        </section>
    </body></html>"#;

    #[tokio::test]
    async fn test_about_sections_are_bound() {
        let client = client_with(vec![(
            "about.json",
            json!({
                "story_en": "Founded in Tirana.\n\nNow nationwide.",
                "story_sq": "Themeluar në Tiranë.",
                "story_image": "/assets/story.jpg",
                "vision_en": "Reliable buildings",
                "vision_sq": "Ndërtesa të besueshme",
                "founder": {
                    "name_en": "Arben Hoxha",
                    "title_en": "Founder",
                    "title_sq": "Themelues",
                    "image": "/assets/founder.jpg",
                    "bio_en": "Led by **twenty years** of practice.",
                    "bio_sq": "Me **njëzet vjet** përvojë.",
                },
                "certifications": {
                    "title_en": "Certified",
                    "title_sq": "Të certifikuar",
                    "items": [
                        { "image": "/assets/iso.png", "name_en": "ISO 9001", "name_sq": "ISO 9001 SQ" },
                        { "image": "/assets/ce.png" },
                    ]
                },
            }),
        )]);
        let service = service(client);

        let mut doc = Document::parse(ABOUT).unwrap();
        service.hydrate(Page::About, &mut doc, Language::Sq).await;

        let story: Vec<String> = doc.query_all(".text-content p").iter().map(|p| p.text()).collect();
        assert_eq!(story, vec!["Themeluar në Tiranë.", "Now nationwide."]);
        assert_eq!(doc.query(".story-image img").unwrap().attr("src"), Some("/assets/story.jpg"));

        assert_eq!(doc.query(".value-card:nth-child(1) p").unwrap().text(), "Fallback mission");
        assert_eq!(doc.query(".value-card:nth-child(2) p").unwrap().text(), "Ndërtesa të besueshme");

        let founder = doc.query(".founder-section").unwrap();
        assert_eq!(founder.style("display").as_deref(), Some("block"));
        assert_eq!(doc.query(".founder-name").unwrap().text(), "Arben Hoxha");
        assert_eq!(doc.query(".founder-title").unwrap().text(), "Themelues");
        assert_eq!(doc.query(".founder-image img").unwrap().attr("alt"), Some("Arben Hoxha"));

        let bio = doc.query(".founder-bio p").unwrap();
        assert!(bio.has_attr("data-html"));
        assert_eq!(bio.query("strong").unwrap().text(), "njëzet vjet");
        assert_eq!(bio.text(), "Me njëzet vjet përvojë.");

        let certs = doc.query(".certifications").unwrap();
        assert_eq!(certs.query(".section-title").unwrap().text(), "Të certifikuar");
        let titles: Vec<Option<&str>> = certs.query_all(".cert-item").iter().map(|c| c.attr("title")).collect();
        assert_eq!(titles, vec![Some("ISO 9001 SQ"), None]);
    }

    #[tokio::test]
    async fn test_about_without_founder_keeps_section_hidden() {
        let client = client_with(vec![("about.json", json!({ "founder": { "title_en": "No name" } }))]);
        let service = service(client);

        let mut doc = Document::parse(ABOUT).unwrap();
        service.hydrate(Page::About, &mut doc, Language::En).await;

        let founder = doc.query(".founder-section").unwrap();
        assert_eq!(founder.style("display").as_deref(), Some("none"));
        assert_eq!(doc.query(".text-content p").unwrap().text(), "Fallback story");
    }

    const CONTACT: &str = r#"<html><body>
        <div class="contact-card"><a href="tel:000">000</a></div>
        <div class="contact-card"><a href="mailto:old@example.com">old@example.com</a></div>
        <div class="contact-card"><p class="contact-address">Old address</p></div>
        <div class="map-container"><div class="map-placeholder">Map</div></div>
        <footer><ul class="footer-contact">
            <li class="footer-phone">000</li>
            <li class="footer-email">old@example.com</li>
        </ul></footer>
    </body></html>"#;

    #[tokio::test]
    async fn test_contact_page_links_and_map() {
        let client = client_with(vec![(
            "contact.json",
            json!({
                "phone": "+355 69 123 4567",
                "email": "info@ejona.al",
                "address_en": "Rruga e Kavajës, Tirana",
                "google_maps_url": "<iframe src=\"https://www.google.com/maps/embed?pb=abc\" width=\"600\" height=\"450\"></iframe>",
            }),
        )]);
        let service = service(client);

        let mut doc = Document::parse(CONTACT).unwrap();
        service.hydrate(Page::Contact, &mut doc, Language::Sq).await;

        let phone = doc.query(r#".contact-card a[href^="tel:"]"#).unwrap();
        assert_eq!(phone.attr("href"), Some("tel:+355691234567"));
        assert_eq!(phone.text(), "+355 69 123 4567");

        let email = doc.query(r#".contact-card a[href^="mailto:"]"#).unwrap();
        assert_eq!(email.attr("href"), Some("mailto:info@ejona.al"));
        assert_eq!(email.text(), "info@ejona.al");

        // No Albanian address: the English one is shown.
        assert_eq!(doc.query(".contact-address").unwrap().text(), "Rruga e Kavajës, Tirana");

        assert_eq!(doc.count(".map-container .map-placeholder"), 0);
        assert_eq!(
            doc.query(".map-container iframe").unwrap().attr("src"),
            Some("https://www.google.com/maps/embed?pb=abc")
        );

        assert_eq!(doc.query(".footer-phone").unwrap().text(), "+355 69 123 4567");
        assert_eq!(doc.query(".footer-email").unwrap().text(), "info@ejona.al");
    }

    #[tokio::test]
    async fn test_contact_cards_only_bound_on_contact_page() {
        let client = client_with(vec![("contact.json", json!({ "phone": "+355 69 123 4567" }))]);
        let service = service(client);

        let mut doc = Document::parse(CONTACT).unwrap();
        service.hydrate(Page::About, &mut doc, Language::En).await;

        assert_eq!(doc.query(r#".contact-card a[href^="tel:"]"#).unwrap().attr("href"), Some("tel:000"));
        assert_eq!(doc.query(".footer-phone").unwrap().text(), "+355 69 123 4567");
    }

    const PARTNER: &str = r#"<html><body>
        <section class="page-header">
            <h1 class="page-title">Become a Partner</h1>
            <p class="page-subtitle">Fallback subtitle</p>
        </section>
        <section class="partner-intro">
            <h2 class="section-title">Why partner</h2>
            <p class="section-subtitle">Fallback intro</p>
        </section>
        <section class="partner-form-section">
            <h2 class="section-title">Apply</h2>
            <p>Fallback form text</p>
        </section>
    </body></html>"#;

    #[tokio::test]
    async fn test_partner_page_is_bound() {
        let client = client_with(vec![(
            "partner.json",
            json!({
                "title_en": "Partner with us",
                "title_sq": "Bashkëpunoni me ne",
                "subtitle_en": "Grow together",
                "subtitle_sq": "Rritemi së bashku",
                "intro_title_en": "Distributors welcome",
                "form_desc_en": "Tell us about your company",
                "form_desc_sq": "Na tregoni për kompaninë tuaj",
            }),
        )]);
        let service = service(client);

        let mut doc = Document::parse(PARTNER).unwrap();
        service.hydrate(Page::Partner, &mut doc, Language::Sq).await;

        assert_eq!(doc.query(".page-title").unwrap().text(), "Bashkëpunoni me ne");
        assert_eq!(doc.query(".page-subtitle").unwrap().text(), "Rritemi së bashku");
        assert_eq!(doc.query(".partner-intro .section-title").unwrap().text(), "Distributors welcome");
        assert_eq!(doc.query(".partner-intro .section-subtitle").unwrap().text(), "Fallback intro");
        assert_eq!(doc.query(".partner-form-section .section-title").unwrap().text(), "Apply");
        assert_eq!(
            doc.query(".partner-form-section p").unwrap().text(),
            "Na tregoni për kompaninë tuaj"
        );
    }

    #[tokio::test]
    async fn test_partner_requires_title_and_subtitle() {
        let client = client_with(vec![("partner.json", json!({ "title_en": "Partner with us" }))]);
        let service = service(client);

        let mut doc = Document::parse(PARTNER).unwrap();
        service.hydrate(Page::Partner, &mut doc, Language::En).await;

        assert_eq!(doc.query(".page-title").unwrap().text(), "Become a Partner");
    }

    #[tokio::test]
    async fn test_service_images_are_positional() {
        let client = client_with(vec![
            (
                "services/elevators.json",
                json!({ "name_en": "Elevators", "image": "/assets/services/elevators.jpg" }),
            ),
            ("services/waterworks.json", json!({ "image": "/assets/services/water.jpg" })),
        ]);
        let service = service(client);

        let markup = r#"<html><body>
            <div class="service-image"><div class="image-placeholder">1</div></div>
            <div class="service-image"><div class="image-placeholder">2</div></div>
            <div class="service-image"><div class="image-placeholder">3</div></div>
        </body></html>"#;
        let mut doc = Document::parse(markup).unwrap();
        service.hydrate(Page::Services, &mut doc, Language::En).await;

        let slots = doc.query_all(".service-image");
        let first = slots[0].query("img").unwrap();
        assert_eq!(first.attr("src"), Some("/assets/services/elevators.jpg"));
        assert_eq!(first.attr("alt"), Some("Elevators"));
        assert_eq!(slots[1].query(".image-placeholder").unwrap().text(), "2");
        assert_eq!(slots[2].query("img").unwrap().attr("src"), Some("/assets/services/water.jpg"));
        assert_eq!(slots[2].query("img").unwrap().attr("alt"), Some(""));
    }
}
