use std::cmp::Ordering;

use serde::Deserialize;

use crate::models::{ContentType, RecommendationItem};

/// Leading release year of a free-form year string ("2019", "2008-2013", "c. 1999")
///
/// Returns `None` when the text holds no digits; callers treat that as unknown.
pub fn leading_year(year: &str) -> Option<i32> {
    let digits: String = year
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// First decimal number in a rating string, e.g. 8.1 from "IMDb: 8.1/10"
pub fn parse_rating(rating: &str) -> Option<f32> {
    let number: String = rating
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.trim_end_matches('.').parse().ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the model's ordering
    #[default]
    Relevance,
    YearDesc,
    YearAsc,
    Rating,
    Title,
}

/// Narrowing and ordering applied to the current recommendation set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationFilter {
    pub genre: Option<String>,
    /// Decade start, e.g. 1990
    pub decade: Option<i32>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub sort: SortOrder,
}

impl RecommendationFilter {
    pub fn matches(&self, item: &RecommendationItem) -> bool {
        if let Some(genre) = &self.genre {
            let genre = genre.trim();
            if !item.genres.iter().any(|g| g.trim().eq_ignore_ascii_case(genre)) {
                return false;
            }
        }

        if let Some(decade) = self.decade {
            match leading_year(&item.year) {
                Some(year) if year - year.rem_euclid(10) == decade => {}
                _ => return false,
            }
        }

        if let Some(content_type) = self.content_type {
            if item.content_type != content_type {
                return false;
            }
        }

        true
    }

    /// Filters then sorts; the sort is stable and unknown values go last
    pub fn apply(&self, items: &[RecommendationItem]) -> Vec<RecommendationItem> {
        let mut selected: Vec<RecommendationItem> =
            items.iter().filter(|item| self.matches(item)).cloned().collect();

        match self.sort {
            SortOrder::Relevance => {}
            SortOrder::YearDesc => selected.sort_by(|a, b| {
                known_first(leading_year(&a.year), leading_year(&b.year), |x, y| y.cmp(x))
            }),
            SortOrder::YearAsc => selected.sort_by(|a, b| {
                known_first(leading_year(&a.year), leading_year(&b.year), |x, y| x.cmp(y))
            }),
            SortOrder::Rating => selected.sort_by(|a, b| {
                known_first(parse_rating(&a.rating), parse_rating(&b.rating), |x, y| {
                    y.partial_cmp(x).unwrap_or(Ordering::Equal)
                })
            }),
            SortOrder::Title => {
                selected.sort_by_key(|item| item.title.to_lowercase());
            }
        }

        selected
    }
}

fn known_first<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
