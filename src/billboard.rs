use crate::chart::{ChartEntry, ChartSource};
use crate::error::RetrievalError;
use chrono::NaiveDate;
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

const BASE_URL: &str = "https://www.billboard.com/charts/";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";
const TIMEOUT: Duration = Duration::from_secs(25);

/// Scrapes chart pages from billboard.com.
#[derive(Debug, Clone)]
pub struct BillboardSource {
    base_url: Url,
    date: Option<NaiveDate>,
}

impl Default for BillboardSource {
    fn default() -> Self {
        BillboardSource {
            base_url: Url::parse(BASE_URL).unwrap(),
            date: None,
        }
    }
}

impl BillboardSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the chart as it stood in the week of `date` instead of the
    /// current one.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// `base_url` should end in a slash, otherwise its last segment is
    /// replaced by the chart slug.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn chart_url(&self, slug: &str) -> Result<Url, RetrievalError> {
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(RetrievalError::InvalidIdentifier(slug.to_string()));
        }

        let path = match self.date {
            Some(date) => format!("{}/{}/", slug, date.format("%Y-%m-%d")),
            None => format!("{}/", slug),
        };
        self.base_url
            .join(&path)
            .map_err(|_| RetrievalError::InvalidIdentifier(slug.to_string()))
    }
}

impl ChartSource for BillboardSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<ChartEntry>, RetrievalError> {
        let url = self.chart_url(identifier)?;
        debug!("GET {}", url);

        let response = attohttpc::get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(TIMEOUT)
            .send()?;

        check_status(identifier, response.status().as_u16())?;

        let html = response.text()?;
        let entries = parse_chart(&html);
        if entries.is_empty() {
            warn!("chart {:?} has no entries", identifier);
        }

        Ok(entries)
    }
}

/// Map a non-2xx response for chart `identifier` to its error.
fn check_status(identifier: &str, status: u16) -> Result<(), RetrievalError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(RetrievalError::NotFound {
            chart: identifier.to_string(),
        }),
        _ => Err(RetrievalError::Status {
            chart: identifier.to_string(),
            status,
        }),
    }
}

fn text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Some(None)` for a dash (no previous position), `None` if the label isn't
/// a chart statistic at all.
fn stat(label: &str) -> Option<Option<u32>> {
    if label == "-" {
        Some(None)
    } else {
        label.parse().ok().map(Some)
    }
}

/// Extract chart entries from a chart page, in page order.
pub fn parse_chart(html: &str) -> Vec<ChartEntry> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("ul.o-chart-results-list-row").unwrap();
    let li_selector = Selector::parse("li").unwrap();
    let label_selector = Selector::parse("span.c-label").unwrap();
    let title_selector = Selector::parse("#title-of-a-story").unwrap();
    let artist_selector = Selector::parse("#title-of-a-story + span.c-label").unwrap();

    document
        .select(&row_selector)
        .filter_map(|row| {
            let title = text(row.select(&title_selector).next()?);
            if title.is_empty() {
                return None;
            }

            let artist = row.select(&artist_selector).next();

            let rank = row
                .select(&li_selector)
                .next()
                .and_then(|li| li.select(&label_selector).next())
                .and_then(|label| text(label).parse().ok());

            let labels: Vec<_> = row.select(&label_selector).collect();
            let is_new = labels.iter().any(|&label| text(label) == "NEW");

            let after_title = match artist {
                Some(artist) => labels
                    .iter()
                    .position(|label| label.id() == artist.id())
                    .map_or(labels.len(), |i| i + 1),
                None => 1,
            };
            let stats: Vec<_> = labels
                .iter()
                .skip(after_title)
                .filter_map(|&label| stat(&text(label)))
                .collect();
            let (last_pos, peak_pos, weeks) = match stats.len() {
                n if n >= 3 => (stats[n - 3], stats[n - 2], stats[n - 1]),
                _ => (None, None, None),
            };

            Some(ChartEntry {
                title,
                artist: artist.map(text).unwrap_or_default(),
                rank,
                last_pos,
                peak_pos,
                weeks,
                is_new,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<div class="chart-results-list">
  <div class="o-chart-results-list-row-container">
    <ul class="o-chart-results-list-row">
      <li class="o-chart-results-list__item"><span class="c-label">1</span></li>
      <li class="o-chart-results-list__item"><span class="c-label">NEW</span></li>
      <li class="o-chart-results-list__item"><img src="a.jpg"></li>
      <li class="o-chart-results-list__item">
        <h3 id="title-of-a-story" class="c-title">
          Song A
        </h3>
        <span class="c-label">
          Artist X
        </span>
      </li>
      <li class="o-chart-results-list__item"><span class="c-label">-</span></li>
      <li class="o-chart-results-list__item"><span class="c-label">1</span></li>
      <li class="o-chart-results-list__item"><span class="c-label">1</span></li>
    </ul>
  </div>
  <div class="o-chart-results-list-row-container">
    <ul class="o-chart-results-list-row">
      <li class="o-chart-results-list__item"><span class="c-label">2</span></li>
      <li class="o-chart-results-list__item">
        <h3 id="title-of-a-story" class="c-title">Song B &amp; More</h3>
        <span class="c-label">Artist Y Featuring Artist Z</span>
      </li>
      <li class="o-chart-results-list__item"><span class="c-label">3</span></li>
      <li class="o-chart-results-list__item"><span class="c-label">2</span></li>
      <li class="o-chart-results-list__item"><span class="c-label">14</span></li>
    </ul>
  </div>
  <div class="o-chart-results-list-row-container">
    <ul class="o-chart-results-list-row">
      <li class="o-chart-results-list__item"><span class="c-label">3</span></li>
    </ul>
  </div>
</div>
</body></html>
"#;

    #[test]
    fn parses_rows_in_order() {
        let entries = parse_chart(PAGE);
        assert_eq!(entries.len(), 2);

        assert_eq!(
            entries[0],
            ChartEntry {
                title: "Song A".into(),
                artist: "Artist X".into(),
                rank: Some(1),
                last_pos: None,
                peak_pos: Some(1),
                weeks: Some(1),
                is_new: true,
            }
        );

        assert_eq!(
            entries[1],
            ChartEntry {
                title: "Song B & More".into(),
                artist: "Artist Y Featuring Artist Z".into(),
                rank: Some(2),
                last_pos: Some(3),
                peak_pos: Some(2),
                weeks: Some(14),
                is_new: false,
            }
        );
    }

    #[test]
    fn empty_page() {
        assert!(parse_chart("<html><body></body></html>").is_empty());
    }

    #[test]
    fn status_mapping() {
        assert!(check_status("hot-100", 200).is_ok());
        assert!(check_status("hot-100", 204).is_ok());

        match check_status("not-a-real-chart", 404) {
            Err(RetrievalError::NotFound { chart }) => assert_eq!(chart, "not-a-real-chart"),
            other => panic!("{:?}", other),
        }

        for &code in &[301, 403, 500, 503] {
            match check_status("hot-100", code) {
                Err(RetrievalError::Status { chart, status }) => {
                    assert_eq!(chart, "hot-100");
                    assert_eq!(status, code);
                }
                other => panic!("{} -> {:?}", code, other),
            }
        }
    }

    #[test]
    fn chart_urls() {
        let source = BillboardSource::new();
        assert_eq!(
            source.chart_url("hot-100").unwrap().as_str(),
            "https://www.billboard.com/charts/hot-100/"
        );

        let dated = source.with_date(NaiveDate::from_ymd(2021, 1, 2));
        assert_eq!(
            dated.chart_url("r-and-b-songs").unwrap().as_str(),
            "https://www.billboard.com/charts/r-and-b-songs/2021-01-02/"
        );
    }

    #[test]
    fn custom_base_url() {
        let source = BillboardSource::new()
            .with_base_url(Url::parse("http://localhost:8080/charts/").unwrap());
        assert_eq!(
            source.chart_url("jazz-songs").unwrap().as_str(),
            "http://localhost:8080/charts/jazz-songs/"
        );
    }

    #[test]
    fn rejects_bad_identifiers() {
        let source = BillboardSource::new();
        for slug in &["", "../etc", "hot 100", "a/b", "r&b"] {
            match source.chart_url(slug) {
                Err(RetrievalError::InvalidIdentifier(s)) => assert_eq!(&s, slug),
                other => panic!("{:?} -> {:?}", slug, other),
            }
        }
    }
}
