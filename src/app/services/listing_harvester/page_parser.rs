//! Result page parsing
//!
//! Extracts the result count, the last page index and one
//! [`VerdictRecord`] per result container from a search response.
//!
//! The result markup carries no stable attribute names for most fields, so
//! extraction is positional: the n-th `div.col-sm-12` of a container and the
//! n-th bold element inside it. The ECLI is taken from the fifth section and
//! cleared by every other section, so it only survives when the fifth
//! section is the last one of the container.

use crate::app::models::{VerdictField, VerdictRecord, document_filename};
use crate::constants::selectors;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Last page index advertised by the pagination control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastPage {
    /// Largest page index referenced by the page-jump handler
    Found(u32),
    /// The page has no pagination control (a single result page)
    Absent,
    /// A pagination control exists but no page index could be read from it
    Malformed(String),
}

/// One record together with the fields its container did not provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordExtraction {
    pub record: VerdictRecord,
    pub missing: Vec<VerdictField>,
}

impl RecordExtraction {
    fn new(record: VerdictRecord) -> Self {
        let missing = VerdictField::ALL
            .into_iter()
            .filter(|field| field.value(&record).is_none())
            .collect();
        Self { record, missing }
    }

    /// True when every field was found
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Everything read from one search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPage {
    /// Total results reported by the portal
    pub total_results: Option<u64>,
    /// Last page index reported by the pagination control
    pub last_page: LastPage,
    /// Records in page order, footer container excluded
    pub records: Vec<RecordExtraction>,
}

/// Parser for search responses, holding its compiled selectors
pub struct PageParser {
    container: Selector,
    tribunal_anchor: Selector,
    section: Selector,
    anchor: Selector,
    bold: Selector,
    strong: Selector,
    pagination_item: Selector,
    page_number: Regex,
}

impl Default for PageParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PageParser {
    pub fn new() -> Self {
        // Selectors and pattern are constants
        Self {
            container: Selector::parse(selectors::RESULT_CONTAINER).unwrap(),
            tribunal_anchor: Selector::parse(selectors::TRIBUNAL_ANCHOR).unwrap(),
            section: Selector::parse(selectors::RESULT_SECTION).unwrap(),
            anchor: Selector::parse("a").unwrap(),
            bold: Selector::parse("b").unwrap(),
            strong: Selector::parse("strong").unwrap(),
            pagination_item: Selector::parse(selectors::PAGINATION_ITEM).unwrap(),
            page_number: Regex::new("[0-9]+").unwrap(),
        }
    }

    /// Parse a complete search response
    pub fn parse(&self, html: &str) -> ResultsPage {
        let document = Html::parse_document(html);

        ResultsPage {
            total_results: self.total_results(&document),
            last_page: self.last_page(&document),
            records: self
                .result_containers(&document)
                .into_iter()
                .map(|container| self.extract_record(container))
                .collect(),
        }
    }

    /// Result count: the first strong element of the page
    pub fn total_results(&self, document: &Html) -> Option<u64> {
        let text = document
            .select(&self.strong)
            .next()
            .map(|s| s.text().collect::<String>())?;

        // Thousands may be grouped with dots ("1.234")
        let digits: String = text
            .trim()
            .chars()
            .filter(|c| *c != '.' && *c != ',')
            .collect();
        digits.parse().ok()
    }

    /// Last page index from the final pagination item's page-jump handler
    pub fn last_page(&self, document: &Html) -> LastPage {
        let Some(item) = document.select(&self.pagination_item).last() else {
            return LastPage::Absent;
        };

        let mut largest: Option<u32> = None;
        for anchor in item.select(&self.anchor) {
            let Some(onclick) = anchor.value().attr("onclick") else {
                continue;
            };
            if !onclick.starts_with(selectors::PAGE_JUMP_HANDLER) {
                continue;
            }

            for number in self.page_number.find_iter(onclick) {
                if let Ok(n) = number.as_str().parse::<u32>() {
                    largest = Some(largest.map_or(n, |l| l.max(n)));
                }
            }
        }

        match largest {
            Some(n) => LastPage::Found(n),
            None => LastPage::Malformed(item.html()),
        }
    }

    /// Result containers of a page, the trailing footer container excluded
    pub fn result_containers<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let all: Vec<ElementRef<'a>> = document.select(&self.container).collect();
        let results = all.len().saturating_sub(1);
        all.into_iter().take(results).collect()
    }

    /// Extract one record from a result container
    pub fn extract_record(&self, container: ElementRef<'_>) -> RecordExtraction {
        let mut record = VerdictRecord::new();

        let first_class = container
            .value()
            .attr("class")
            .and_then(|c| c.split_whitespace().next());

        if first_class == Some(selectors::RESULT_ITEM_CLASS) {
            // Last matching anchor wins
            for link in container.select(&self.tribunal_anchor) {
                let Some(code) = link.value().attr(selectors::TRIBUNAL_ATTRIBUTE) else {
                    continue;
                };
                record.tribunal_code = Some(code.to_string());
                record.url = link.value().attr("href").map(str::to_string);
                record.filename = record
                    .url
                    .as_deref()
                    .and_then(|href| document_filename(code, href));
            }
        }

        for (index, section) in container.select(&self.section).enumerate() {
            let slot = index + 1;
            match slot {
                1 => {
                    if let Some(title) = section.select(&self.anchor).nth(1) {
                        record.title = element_text(title);
                    }
                }
                2 => {
                    for (n, bold) in section.select(&self.bold).take(4).enumerate() {
                        let value = element_text(bold);
                        match n {
                            0 => record.decision_type = value,
                            1 => record.tribunal_city = value,
                            2 => record.tribunal_section = value,
                            _ => record.decision_number = value,
                        }
                    }
                }
                4 => {
                    if let Some(bold) = section.select(&self.bold).next() {
                        record.recourse_number = element_text(bold);
                    }
                }
                _ => {}
            }

            if slot == 5 {
                if let Some(bold) = section.select(&self.bold).next() {
                    record.ecli = element_text(bold);
                }
            } else {
                record.ecli = None;
            }
        }

        RecordExtraction::new(record)
    }
}

/// Whitespace-normalized text of an element, `None` when blank
fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() { None } else { Some(text) }
}
