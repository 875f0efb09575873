use log::{debug, error, info};

use crate::error::Error;

/// Logs one step of a request through the pipeline.
///
/// `key` identifies the request: a query, a volume id or a user id.
pub fn update(key: &str, stage: Stage) {
    match stage {
        Stage::Fail(err) => error!("{}: {}: {}", key, stage.to_string(), err),
        Stage::Discarded { .. } => debug!("{}: {}", key, stage.to_string()),
        other => info!("{}: {}", key, other.to_string()),
    }
}

pub enum Stage<'a> {
    Dispatched { seq: u64 },
    FetchedBooks(usize),
    FetchedBook,
    Settled { seq: u64 },
    Discarded { seq: u64, latest: u64 },
    Fail(&'a Error),
}

impl<'a> ToString for Stage<'a> {
    fn to_string(&self) -> String {
        match self {
            Self::Dispatched { seq } => format!("Dispatched #{}", seq),
            Self::FetchedBooks(n) => format!("Fetched {} Books", n),
            Self::FetchedBook => "Fetched Book".to_string(),
            Self::Settled { seq } => format!("Settled #{}", seq),
            Self::Discarded { seq, latest } => {
                format!("Discarded #{} (latest is #{})", seq, latest)
            }
            Self::Fail(_) => "Fail".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stage;

    #[test]
    fn stage_names() -> anyhow::Result<()> {
        assert_eq!("Fetched 2 Books", Stage::FetchedBooks(2).to_string());
        assert_eq!(
            "Discarded #1 (latest is #2)",
            Stage::Discarded { seq: 1, latest: 2 }.to_string()
        );

        Ok(())
    }
}
