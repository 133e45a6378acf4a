//! Per-page section binders. Each one writes a validated record into the
//! template's fallback markup and leaves anything it cannot find untouched.

use crate::binder::{self, bind_optional, bind_plain, bind_text};
use crate::dom::Element;
use crate::language::Language;
use crate::models::{AboutContent, ContactContent, CtaContent, HomeContent, PartnerContent, ServiceContent};
use crate::render;

const ROUNDED_COVER: &str = "width: 100%; height: 100%; object-fit: cover; border-radius: 12px;";

pub fn apply_cta(root: &mut Element, cta: &CtaContent, lang: Language) {
    let Some(section) = root.query_mut(".cta") else {
        return;
    };

    if let Some(background) = &cta.background_image {
        section.set_style("background-image", &format!("url('{}')", background));
    }
    bind_text(section.query_mut(".cta-title"), &cta.title, lang);
    bind_text(section.query_mut(".cta-text"), &cta.text, lang);

    if let Some(buttons) = section.query_mut(".cta-buttons") {
        buttons.clear();
        buttons.append(render::cta_button(&cta.primary, "btn btn-primary", lang));
        if let Some(secondary) = &cta.secondary {
            buttons.append(render::cta_button(secondary, "btn btn-secondary-white", lang));
        }
    }
}

pub fn apply_home(root: &mut Element, home: &HomeContent, lang: Language) {
    bind_optional(root.query_mut(".hero-title"), home.hero_title.as_ref(), lang);
    bind_optional(root.query_mut(".hero-subtitle"), home.hero_subtitle.as_ref(), lang);

    if let Some(stats) = &home.stats {
        if root.count(".stat-number") >= 4 {
            let values = [
                format!("{}+", stats.engineers),
                format!("{}+", stats.projects),
                stats.support.clone(),
                format!("{}+", stats.years),
            ];
            for (index, value) in values.iter().enumerate() {
                if let Some(stat) = root.query_nth_mut(".stat-number", index) {
                    stat.set_attr("data-count", value);
                    stat.set_text(value);
                }
            }
        }
    }

    if let Some(why) = &home.why_choose {
        binder::replace_with_image(
            root.query_mut(".why-choose-image"),
            why.image.as_deref(),
            "Why Choose EJONA",
            ROUNDED_COVER,
        );
        if !why.features.is_empty() {
            if let Some(list) = root.query_mut(".features-list") {
                list.clear();
                for feature in &why.features {
                    list.append(render::feature_item(feature, lang));
                }
            }
        }
    }

    if !home.client_logos.is_empty() {
        if let Some(grid) = root.query_mut(".clients-grid") {
            grid.clear();
            for client in &home.client_logos {
                grid.append(render::client_logo(client));
            }
        }
    }
}

pub fn apply_about(root: &mut Element, about: &AboutContent, lang: Language) {
    if let Some(story) = &about.story {
        if let Some(container) = root.query_mut(".story-text .text-content") {
            container.clear();
            for paragraph in binder::paired_paragraphs(story) {
                container.append(binder::bilingual("p", &paragraph, lang));
            }
        }
    }

    binder::replace_with_image(
        root.query_mut(".story-image"),
        about.story_image.as_deref(),
        "EJONA Company",
        "width: 100%; height: 100%; object-fit: cover;",
    );

    bind_optional(root.query_mut(".value-card:nth-child(1) p"), about.mission.as_ref(), lang);
    bind_optional(root.query_mut(".value-card:nth-child(2) p"), about.vision.as_ref(), lang);

    if let Some(founder) = &about.founder {
        if let Some(section) = root.query_mut(".founder-section") {
            section.set_style("display", "block");
        }
        bind_text(root.query_mut(".founder-name"), &founder.name, lang);
        bind_optional(root.query_mut(".founder-title"), founder.title.as_ref(), lang);
        binder::replace_with_image(
            root.query_mut(".founder-image"),
            founder.image.as_deref(),
            &founder.name.en,
            "width: 100%; height: auto; border-radius: 16px;",
        );
        if let Some(bio) = &founder.bio {
            if let Some(container) = root.query_mut(".founder-bio") {
                container.clear();
                for paragraph in binder::paired_paragraphs(bio) {
                    let mut p = Element::new("p");
                    binder::bind_markup(Some(&mut p), &paragraph, lang);
                    container.append(p);
                }
            }
        }
    }

    if let Some(certs) = &about.certifications {
        let Some(section) = root.query_mut(".certifications") else {
            return;
        };
        bind_optional(section.query_mut(".section-title"), certs.title.as_ref(), lang);
        bind_optional(section.query_mut(".section-subtitle"), certs.subtitle.as_ref(), lang);
        if !certs.items.is_empty() {
            if let Some(grid) = section.query_mut(".cert-grid") {
                grid.clear();
                for cert in &certs.items {
                    grid.append(render::cert_item(cert, lang));
                }
            }
        }
    }
}

/// Footer contact block, present on every page.
pub fn apply_footer_contact(root: &mut Element, contact: &ContactContent, lang: Language) {
    bind_plain(root.query_mut(".footer-contact .footer-phone"), contact.phone.as_deref());
    bind_plain(root.query_mut(".footer-contact .footer-email"), contact.email.as_deref());
    bind_optional(root.query_mut(".footer-contact .footer-address"), contact.address.as_ref(), lang);
}

/// Contact cards, footer and map on the contact page.
pub fn apply_contact_page(root: &mut Element, contact: &ContactContent, lang: Language) {
    if let Some(phone) = &contact.phone {
        if let Some(link) = root.query_mut(r#".contact-card a[href^="tel:"]"#) {
            let dial: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
            link.set_attr("href", &format!("tel:{}", dial));
            link.set_text(phone);
        }
    }
    if let Some(email) = &contact.email {
        if let Some(link) = root.query_mut(r#".contact-card a[href^="mailto:"]"#) {
            link.set_attr("href", &format!("mailto:{}", email));
            link.set_text(email);
        }
    }
    bind_optional(root.query_mut(".contact-card .contact-address"), contact.address.as_ref(), lang);

    apply_footer_contact(root, contact, lang);

    if let Some(embed) = &contact.google_maps_url {
        if let Some(container) = root.query_mut(".map-container") {
            container.clear();
            container.append(render::map_iframe(embed));
        }
    }
}

pub fn apply_partner(root: &mut Element, partner: &PartnerContent, lang: Language) {
    bind_text(root.query_mut(".page-header .page-title"), &partner.title, lang);
    bind_text(root.query_mut(".page-header .page-subtitle"), &partner.subtitle, lang);
    bind_optional(root.query_mut(".partner-intro .section-title"), partner.intro_title.as_ref(), lang);
    bind_optional(root.query_mut(".partner-intro .section-subtitle"), partner.intro_text.as_ref(), lang);
    bind_optional(root.query_mut(".partner-form-section .section-title"), partner.form_title.as_ref(), lang);
    bind_optional(root.query_mut(".partner-form-section p"), partner.form_desc.as_ref(), lang);
}

/// `services` is positional: entry n feeds the n-th `.service-image`.
pub fn apply_service_images(root: &mut Element, services: &[Option<ServiceContent>]) {
    for (index, service) in services.iter().enumerate() {
        let Some(service) = service else {
            continue;
        };
        let alt = service.name.as_ref().map(|n| n.en.as_str()).unwrap_or("");
        binder::replace_with_image(
            root.query_nth_mut(".service-image", index),
            service.image.as_deref(),
            alt,
            ROUNDED_COVER,
        );
    }
}
