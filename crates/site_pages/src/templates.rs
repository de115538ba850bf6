use std::{
    error::Error as _,
    path::{Path, PathBuf},
};

use tera::{Context, ErrorKind, Tera};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("templates directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),
    #[error("failed to load templates")]
    Engine(#[from] tera::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderFailure {
    TemplateMissing,
    Failed(String),
}

/// Every `.html` template the site can render, parsed up front.
#[derive(Debug, Clone)]
pub struct SiteTemplates {
    tera: Tera,
}

impl SiteTemplates {
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateLoadError> {
        if !dir.is_dir() {
            return Err(TemplateLoadError::MissingDirectory(dir.to_path_buf()));
        }

        let pattern = dir.join("**").join("*.html");
        let tera = Tera::new(&pattern.to_string_lossy())?;
        info!(
            templates_dir = %dir.display(),
            count = tera.get_template_names().count(),
            "loaded templates"
        );
        Ok(Self { tera })
    }

    pub fn from_sources<'a, I>(sources: I) -> Result<Self, TemplateLoadError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        Ok(Self { tera })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|loaded| loaded == name)
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, RenderFailure> {
        self.tera.render(name, context).map_err(|err| match err.kind {
            ErrorKind::TemplateNotFound(_) => RenderFailure::TemplateMissing,
            _ => RenderFailure::Failed(describe(&err)),
        })
    }
}

// Tera keeps the useful detail in the source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
