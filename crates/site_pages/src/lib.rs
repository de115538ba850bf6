use std::collections::BTreeMap;

use shared::{
    domain::{
        step_definition, valid_step_range, PageName, TOTAL_STEPS, WIZARD_ACTIVE_PAGE,
        WIZARD_STEPS,
    },
    error::SiteError,
};
use tera::Context;
use tracing::{debug, error, warn};

pub mod templates;

pub use templates::{RenderFailure, SiteTemplates, TemplateLoadError};

pub const NOT_FOUND_TEMPLATE: &str = "404.html";

#[derive(Clone)]
pub struct SiteContext {
    pub templates: SiteTemplates,
}

impl SiteContext {
    pub fn new(templates: SiteTemplates) -> Self {
        Self { templates }
    }
}

/// Renders a content page, retrying hyphenated names once with underscores.
pub fn render_page(ctx: &SiteContext, page: &PageName) -> Result<String, SiteError> {
    if !page.is_resolvable() {
        debug!(page = %page, "rejected unresolvable page name");
        return Err(page_not_found(page));
    }

    let template = page.template_name();
    let mut context = Context::new();
    context.insert("active_page", page.active_page());

    match ctx.templates.render(&template, &context) {
        Ok(html) => return Ok(html),
        Err(RenderFailure::Failed(message)) => return Err(render_failed(template, message)),
        Err(RenderFailure::TemplateMissing) => {}
    }

    let Some(fallback) = page.underscore_variant() else {
        debug!(page = %page, %template, "page template not found");
        return Err(page_not_found(page));
    };

    debug!(page = %page, %template, %fallback, "retrying with underscore template");
    match ctx.templates.render(&fallback, &context) {
        Ok(html) => Ok(html),
        Err(RenderFailure::TemplateMissing) => {
            debug!(page = %page, %fallback, "fallback template not found");
            Err(page_not_found(page))
        }
        Err(RenderFailure::Failed(message)) => Err(render_failed(fallback, message)),
    }
}

/// Renders one page of the new-project wizard.
pub fn render_wizard_step(ctx: &SiteContext, step: u32) -> Result<String, SiteError> {
    let Some(definition) = step_definition(step) else {
        debug!(step, "wizard step out of range");
        return Err(SiteError::not_found(format!(
            "Step {step} not found. Valid steps are {}",
            valid_step_range()
        )));
    };

    let step_names: BTreeMap<u32, &str> = WIZARD_STEPS
        .iter()
        .map(|step| (step.number, step.label))
        .collect();

    let mut context = Context::new();
    context.insert("current_step", &step);
    context.insert("total_steps", &TOTAL_STEPS);
    context.insert("step_names", &step_names);
    context.insert("step_name", definition.label);
    context.insert("active_page", WIZARD_ACTIVE_PAGE);

    ctx.templates
        .render(definition.template, &context)
        .map_err(|failure| {
            debug!(step, template = definition.template, ?failure, "wizard step failed to render");
            SiteError::not_found(format!(
                "Template for step {step} ({}) not found",
                definition.template
            ))
        })
}

/// Renders the site's 404 template, if it has one.
pub fn render_not_found_page(ctx: &SiteContext, message: &str, path: &str) -> Option<String> {
    if !ctx.templates.contains(NOT_FOUND_TEMPLATE) {
        return None;
    }

    let mut context = Context::new();
    context.insert("message", message);
    context.insert("path", path);
    context.insert("active_page", "");

    match ctx.templates.render(NOT_FOUND_TEMPLATE, &context) {
        Ok(html) => Some(html),
        Err(failure) => {
            warn!(?failure, "not-found template failed to render");
            None
        }
    }
}

fn page_not_found(page: &PageName) -> SiteError {
    SiteError::not_found(format!("Page {page} not found"))
}

fn render_failed(template: String, message: String) -> SiteError {
    error!(%template, %message, "page template failed to render");
    SiteError::Render { template, message }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
