use std::path::{Path, PathBuf};
use std::sync::Arc;

use abv_catalog::ImageCache;
use abv_core::{AppConfig, SharedStore};

/// State shared by the inventory API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: SharedStore,
    /// Label images are fetched into this cache whenever inventory is listed.
    /// `None` disables caching.
    pub images: Option<ImageCache>,
}

impl ApiState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            images: None,
        }
    }

    pub fn with_images(mut self, images: ImageCache) -> Self {
        self.images = Some(images);
        self
    }
}

/// State for the front-end server.
#[derive(Clone)]
pub struct WebState {
    /// Raw `front.html` template.
    pub template: Arc<String>,
    pub api_url: Arc<String>,
    pub images_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl WebState {
    /// Load the front page template from `web_root`.
    pub fn load(
        web_root: &Path,
        images_dir: impl Into<PathBuf>,
        api_url: impl Into<String>,
    ) -> std::io::Result<Self> {
        let template = std::fs::read_to_string(web_root.join("front.html"))?;
        Ok(Self {
            template: Arc::new(template),
            api_url: Arc::new(api_url.into()),
            images_dir: images_dir.into(),
            static_dir: web_root.join("static"),
        })
    }

    pub fn from_config(config: &AppConfig) -> std::io::Result<Self> {
        Self::load(
            Path::new(&config.server.web_root),
            config.images_dir(),
            config.server.api_url.clone(),
        )
    }

    /// Front page with the API host substituted in.
    pub fn render_front_page(&self) -> String {
        self.template
            .replace("{{.}}", &self.api_url)
            .replace("{{api_url}}", &self.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_front_page() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("front.html"),
            "<script>var api = 'http://{{.}}:8081'; var alt = '{{api_url}}';</script>",
        )
        .unwrap();

        let state = WebState::load(dir.path(), dir.path().join("images"), "bar.local").unwrap();
        assert_eq!(
            state.render_front_page(),
            "<script>var api = 'http://bar.local:8081'; var alt = 'bar.local';</script>"
        );
        assert_eq!(state.static_dir, dir.path().join("static"));
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(WebState::load(dir.path(), dir.path(), "localhost").is_err());
    }
}
