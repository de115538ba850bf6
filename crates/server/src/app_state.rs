use std::path::PathBuf;

use site_pages::SiteContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) site: SiteContext,
    pub(crate) static_dir: PathBuf,
    pub(crate) debug: bool,
}
