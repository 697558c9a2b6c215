use std::path::{Path, PathBuf};

use crate::error::{CatalogError, Result};

/// Download-once store for drink label images, keyed by file name.
#[derive(Clone)]
pub struct ImageCache {
    client: reqwest::Client,
    dir: PathBuf,
}

impl ImageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder().gzip(true).build()?;
        Ok(Self::with_client(client, dir))
    }

    pub fn with_client(client: reqwest::Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path an image URL is cached under.
    pub fn path_for(&self, url: &str) -> Result<PathBuf> {
        let name = url
            .split(['?', '#'])
            .next()
            .and_then(|u| u.rsplit('/').next())
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            .ok_or_else(|| CatalogError::InvalidImageUrl(url.to_string()))?;
        Ok(self.dir.join(name))
    }

    /// Fetch `url` into the cache unless it is already there. Returns the
    /// local path.
    pub async fn fetch(&self, url: &str) -> Result<PathBuf> {
        let path = self.path_for(url)?;
        if tokio::fs::try_exists(&path).await? {
            return Ok(path);
        }

        let resp = self.client.get(url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;

        tokio::fs::create_dir_all(&self.dir).await?;
        // Only complete downloads ever carry the final name.
        let partial = path.with_extension("part");
        tokio::fs::write(&partial, &bytes).await?;
        tokio::fs::rename(&partial, &path).await?;

        tracing::debug!(url, path = %path.display(), "cached label image");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[test]
    fn test_path_for() {
        let cache = ImageCache::new("/tmp/abv-images").unwrap();
        assert_eq!(
            cache.path_for("https://labels.example/a/brewery.jpeg?v=2").unwrap(),
            PathBuf::from("/tmp/abv-images/brewery.jpeg")
        );
        assert!(cache.path_for("https://labels.example/").is_err());
    }

    #[tokio::test]
    async fn test_fetch_downloads_once() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/labels/logo.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(b"PNGDATA".to_vec())
            .expect(1)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path().join("images")).unwrap();
        let url = format!("{}/labels/logo.png", server.url());

        let path = cache.fetch(&url).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"PNGDATA");

        cache.fetch(&url).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status_writes_nothing() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/labels/missing.png")
            .with_status(404)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let cache = ImageCache::new(dir.path()).unwrap();
        let url = format!("{}/labels/missing.png", server.url());

        assert!(cache.fetch(&url).await.is_err());
        assert!(!dir.path().join("missing.png").exists());
    }
}
