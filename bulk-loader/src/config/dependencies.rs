//! Dependency initialization and wiring for the bulk loader.

use std::sync::Arc;

use tracing::info;

use super::Cli;
use crate::LoaderError;
use bulk_loader_pipeline::{DatasetLoader, DatasetSpec, TracingObserver};
use bulk_loader_repository::OpenSearchClient;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The dataset to load.
    pub spec: DatasetSpec,
    /// Destination URL the client was built for.
    pub host: String,
    /// The configured loader ready to run.
    pub loader: DatasetLoader,
}

impl Dependencies {
    /// Initialize all dependencies from command-line arguments.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(LoaderError)` - If the arguments or destination settings are invalid
    pub fn new(cli: &Cli) -> Result<Self, LoaderError> {
        let spec = cli.dataset_spec()?;
        let ingestor_config = cli.ingestor_config();
        ingestor_config.validate()?;

        let destination = cli.destination_config();
        let host = destination
            .url()
            .map_err(|e| LoaderError::config(e.to_string()))?
            .to_string();

        info!(
            host = %host,
            index = %spec.index(),
            chunk_size = ingestor_config.chunk_size,
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(&destination).map_err(|e| {
            LoaderError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        let loader = DatasetLoader::new(Arc::new(client), Arc::new(TracingObserver), ingestor_config);

        Ok(Self { spec, host, loader })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["bulk-loader"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_adds_scheme_to_host() {
        let deps = Dependencies::new(&cli(&["people.csv", "people", "--host", "search:9200"])).unwrap();
        assert_eq!(deps.host, "http://search:9200/");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let result = Dependencies::new(&cli(&["people.csv", "people", "--host", "ftp://search:21"]));
        assert!(matches!(result, Err(LoaderError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let result = Dependencies::new(&cli(&["people.csv", "people", "--chunk-size", "0"]));
        assert!(matches!(
            result,
            Err(LoaderError::PipelineError(
                bulk_loader_pipeline::PipelineError::ConfigurationError(_)
            ))
        ));
    }
}
