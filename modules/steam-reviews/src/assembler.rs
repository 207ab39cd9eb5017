use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;
use crate::output;
use crate::types::{AppId, NormalizedReview};

/// Sorted reviews plus the file they were written to, if any.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub reviews: Vec<NormalizedReview>,
    pub written: Option<PathBuf>,
}

/// Order by date, then numeric id. Stable, so exact ties keep arrival order.
pub fn sort_reviews(reviews: &mut [NormalizedReview]) {
    reviews.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
}

/// `{app_id}_reviews[_from_YYYYMMDD][_to_YYYYMMDD].json`
///
/// Only the bounds the caller actually supplied appear in the name.
pub fn output_file_name(app_id: AppId, from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let mut name = format!("{app_id}_reviews");
    if let Some(from) = from {
        name.push_str(&format!("_from_{}", from.format("%Y%m%d")));
    }
    if let Some(to) = to {
        name.push_str(&format!("_to_{}", to.format("%Y%m%d")));
    }
    name.push_str(".json");
    name
}

/// Sort, and write the full sequence to `target` when one is given.
pub async fn assemble(mut reviews: Vec<NormalizedReview>, target: Option<&Path>) -> Result<Assembled> {
    sort_reviews(&mut reviews);

    let written = match target {
        Some(path) => {
            output::write_reviews(path, &reviews).await?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(Assembled { reviews, written })
}
