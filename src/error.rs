use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("frontmatter opened with `---` but no closing `---` delimiter was found")]
    MalformedFrontmatter,

    #[error("frontmatter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter must be a key-value mapping")]
    FrontmatterNotMapping,

    #[error("frontmatter field `{field}` must be {expected}")]
    FrontmatterSchema {
        field: &'static str,
        expected: &'static str,
    },

    #[error("no markdown documents to tabulate")]
    EmptyCorpus,

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
