//! Catalog commands: validate, show and export catalog files.
//!
//! Catalog files use the same document shape in JSON and YAML; the format is
//! picked from the file extension.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use leaf_and_co_core::catalog::CatalogDocument;
use leaf_and_co_core::{Catalog, CatalogError};
use tracing::info;

/// Errors loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("unsupported catalog extension '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedExtension(String),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Output format for `catalog export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

/// Parse catalog file contents according to the file extension.
///
/// # Errors
///
/// Returns an error for unknown extensions, malformed documents, or catalogs
/// that fail validation.
pub fn parse_catalog(path: &Path, content: &str) -> Result<Catalog, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => Ok(Catalog::from_json(content)?),
        "yaml" | "yml" => {
            let document: CatalogDocument = serde_yaml::from_str(content)?;
            Ok(Catalog::try_from(document)?)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Load a catalog file, or the built-in catalog when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_catalog(path: Option<&Path>) -> Result<Catalog, LoadError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

    parse_catalog(path, &content)
}

/// Validate a catalog file.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or invalid.
pub async fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Validating catalog");

    let catalog = load_catalog(Some(path)).await?;

    info!("Catalog is valid");
    info!("  Currency: {}", catalog.currency().code());
    info!("  Categories: {}", catalog.categories().len());
    info!("  Products: {}", catalog.products().len());

    let empty: Vec<_> = catalog
        .categories()
        .iter()
        .filter(|category| !catalog.products().iter().any(|p| p.category == **category))
        .collect();
    for category in empty {
        tracing::warn!("  Category '{category}' has no products and will not be listed");
    }

    Ok(())
}

/// Log products grouped by category.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be loaded.
pub async fn show(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(path).await?;

    for (category, products) in catalog.grouped() {
        info!("{category}");
        for product in products {
            info!(
                "  {:<12} {:<24} {}",
                product.id.as_str(),
                product.name,
                catalog.price_of(product)
            );
        }
    }

    Ok(())
}

/// Write a catalog document to stdout.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or serialized.
pub async fn export(
    path: Option<&Path>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = load_catalog(path).await?.to_document();

    let rendered = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&document)?,
        ExportFormat::Yaml => serde_yaml::to_string(&document)?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const YAML: &str = "
currency: INR
categories:
  - Easy Care
products:
  - id: pothos
    name: Golden Pothos
    unit_price: 299
    category: Easy Care
    image_ref: https://images.unsplash.com/pothos
";

    #[test]
    fn test_parse_yaml_catalog() {
        let catalog = parse_catalog(Path::new("plants.yaml"), YAML).unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.contains("pothos"));
    }

    #[test]
    fn test_parse_json_roundtrip_of_builtin() {
        let json = serde_json::to_string(&Catalog::builtin().to_document()).unwrap();
        let catalog = parse_catalog(Path::new("catalog.JSON"), &json).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_yaml_roundtrip_of_builtin() {
        let yaml = serde_yaml::to_string(&Catalog::builtin().to_document()).unwrap();
        let catalog = parse_catalog(Path::new("catalog.yml"), &yaml).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = parse_catalog(Path::new("catalog.toml"), "").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "toml"));
    }

    #[test]
    fn test_invalid_catalog_is_reported() {
        let yaml = YAML.replace("category: Easy Care", "category: Cacti");
        let err = parse_catalog(Path::new("plants.yaml"), &yaml).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Catalog(CatalogError::UnknownCategory { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).await.unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[tokio::test]
    async fn test_load_catalog_missing_file() {
        let err = load_catalog(Some(Path::new("/nonexistent/catalog.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
