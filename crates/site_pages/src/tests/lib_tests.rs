use super::*;
use shared::domain::DASHBOARD_PAGES;

const BASE: &str = "<main>{% block content %}{% endblock %}</main>";
const PAGE: &str = "{% extends \"base.html\" %}{% block content %}[{{ active_page }}]{% endblock %}";
const STEP: &str = "{{ current_step }}/{{ total_steps }} {{ step_name }} \
{% for number, label in step_names %}{{ number }}={{ label }};{% endfor %}";

fn site(extra: &[(&'static str, &'static str)]) -> SiteContext {
    let mut sources = vec![
        ("base.html", BASE),
        ("index.html", PAGE),
        ("pricing.html", PAGE),
        ("privacy_policy.html", "privacy"),
        ("about-us.html", "hyphenated"),
        ("about_us.html", "underscored"),
        ("broken.html", "{{ missing_value | upper }}"),
        ("dashboard.html", PAGE),
        ("project-list.html", PAGE),
        ("new-project.html", PAGE),
        ("your-plan.html", PAGE),
        ("ambassador-affiliate.html", PAGE),
        ("settings.html", PAGE),
    ];
    sources.extend(extra.iter().copied());
    SiteContext::new(SiteTemplates::from_sources(sources).expect("templates"))
}

fn wizard_site() -> SiteContext {
    site(&[
        ("new_projects/step_1.html", STEP),
        ("new_projects/step_2.html", STEP),
        ("new_projects/step_3.html", STEP),
        ("new_projects/step_4.html", STEP),
        ("new_projects/step_5.html", STEP),
        ("new_projects/step_6.html", STEP),
    ])
}

#[test]
fn index_renders_with_empty_active_page() {
    let ctx = site(&[]);
    let html = render_page(&ctx, &PageName::index()).expect("index");
    assert_eq!(html, "<main>[]</main>");
}

#[test]
fn suffixed_names_are_not_double_suffixed() {
    let ctx = site(&[]);
    let plain = render_page(&ctx, &PageName::new("pricing")).expect("plain");
    let suffixed = render_page(&ctx, &PageName::new("pricing.html")).expect("suffixed");
    assert_eq!(plain, suffixed);
}

#[test]
fn dashboard_pages_mark_themselves_active() {
    let ctx = site(&[]);
    for page in DASHBOARD_PAGES {
        let html = render_page(&ctx, &PageName::new(page)).expect("page");
        assert_eq!(html, format!("<main>[{page}]</main>"));

        let html = render_page(&ctx, &PageName::new(format!("{page}.html"))).expect("page");
        assert_eq!(html, format!("<main>[{page}]</main>"));
    }
}

#[test]
fn hyphenated_name_falls_back_to_underscore_template() {
    let ctx = site(&[]);
    let html = render_page(&ctx, &PageName::new("privacy-policy")).expect("fallback");
    assert_eq!(html, "privacy");
}

#[test]
fn direct_match_wins_over_underscore_variant() {
    let ctx = site(&[]);
    let html = render_page(&ctx, &PageName::new("about-us")).expect("direct");
    assert_eq!(html, "hyphenated");
}

#[test]
fn underscore_names_are_not_retried_with_hyphens() {
    let ctx = site(&[("terms-of-use.html", "terms")]);
    let err = render_page(&ctx, &PageName::new("terms_of_use")).expect_err("no reverse fallback");
    assert_eq!(err, SiteError::not_found("Page terms_of_use not found"));
}

#[test]
fn unknown_page_without_hyphen_is_not_found() {
    let ctx = site(&[]);
    let err = render_page(&ctx, &PageName::new("careers")).expect_err("missing");
    assert_eq!(err, SiteError::not_found("Page careers not found"));
}

#[test]
fn unknown_hyphenated_page_is_not_found_after_fallback() {
    let ctx = site(&[]);
    let err = render_page(&ctx, &PageName::new("job-board")).expect_err("missing");
    assert!(matches!(err, SiteError::PageNotFound(message) if message.contains("job-board")));
}

#[test]
fn separators_in_page_name_are_not_found() {
    let ctx = site(&[("includes/navbar.html", "nav")]);
    let err = render_page(&ctx, &PageName::new("includes/navbar")).expect_err("rejected");
    assert!(matches!(err, SiteError::PageNotFound(_)));
}

#[test]
fn broken_page_template_reports_render_error() {
    let ctx = site(&[]);
    let err = render_page(&ctx, &PageName::new("broken")).expect_err("broken");
    assert!(matches!(err, SiteError::Render { ref template, .. } if template == "broken.html"));
}

#[test]
fn every_wizard_step_renders_its_template() {
    let ctx = wizard_site();
    for definition in WIZARD_STEPS {
        let html = render_wizard_step(&ctx, definition.number).expect("step");
        assert!(
            html.starts_with(&format!("{}/6 ", definition.number)),
            "unexpected body for step {}: {html}",
            definition.number
        );
        assert!(html.contains("1=Project Type;"));
        assert!(html.contains("5=Budget;"));
    }
    let html = render_wizard_step(&ctx, 2).expect("step");
    assert!(html.starts_with("2/6 Project Details "));
}

#[test]
fn wizard_steps_outside_range_are_not_found() {
    let ctx = wizard_site();
    for step in [0, 7] {
        let err = render_wizard_step(&ctx, step).expect_err("out of range");
        assert!(matches!(err, SiteError::PageNotFound(ref message) if message.contains("1-6")));
    }
}

#[test]
fn wizard_step_with_missing_template_is_not_found() {
    let ctx = site(&[("new_projects/step_1.html", STEP)]);
    assert!(render_wizard_step(&ctx, 1).is_ok());
    let err = render_wizard_step(&ctx, 3).expect_err("missing template");
    assert!(matches!(err, SiteError::PageNotFound(ref message) if message.contains("step_3.html")));
}

#[test]
fn wizard_step_render_failure_is_not_found() {
    let ctx = site(&[("new_projects/step_4.html", "{{ nope | upper }}")]);
    let err = render_wizard_step(&ctx, 4).expect_err("broken template");
    assert!(matches!(err, SiteError::PageNotFound(_)));
}

#[test]
fn not_found_page_uses_template_when_present() {
    let ctx = site(&[("404.html", "{{ path }}: {{ message }}")]);
    let html = render_not_found_page(&ctx, "Not Found", "/careers/").expect("404 page");
    assert_eq!(html, "&#x2F;careers&#x2F;: Not Found");

    let ctx = site(&[]);
    assert!(render_not_found_page(&ctx, "Not Found", "/careers/").is_none());
}
