//! Tests for the listing harvester
//!
//! Result pages are built from small HTML fixtures mirroring the portal
//! markup; the portal itself is replaced by [`FakePortal`].

pub mod harvester_tests;

use crate::app::services::portal::{SearchPortal, SearchRequest};
use crate::constants::search_form;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Document URL as found in a result container
pub fn document_url(code: &str, n: u32) -> String {
    format!(
        "https://portali.giustizia-amministrativa.it/portale/pages/istituzionale/visualizza?nodeRef=&schema={}&nrg=2022{:05}&nomeFile=2023{:05}_01.html&subDir=Provvedimenti",
        code, n, n
    )
}

/// Expected target filename for [`document_url`]
pub fn document_file(code: &str, n: u32) -> String {
    format!("{}_2023{:05}_01.html", code, n)
}

/// Content of positional section `slot` of verdict `n`
fn section(n: u32, slot: usize) -> String {
    match slot {
        1 => format!(
            r#"<a href="javascript:void(0)"><i class="icon"></i></a>
               <a href="javascript:void(0)">Sentenza n. {}</a>"#,
            n
        ),
        2 => format!(
            "Tipo <b>Sentenza</b> Sede <b>Milano</b> Sezione <b>Sezione  1</b> Numero <b>{}</b>",
            n
        ),
        3 => "Data di pubblicazione 12/05/2023".to_string(),
        4 => format!("Numero ricorso <b>2022{:05}</b>", n),
        5 => format!("ECLI <b>ECLI:IT:TARMI:2023:{}SENT</b>", n),
        _ => "Oggetto".to_string(),
    }
}

/// Result container with a given number of positional sections
pub fn article_with_sections(code: &str, n: u32, sections: usize) -> String {
    let body: String = (1..=sections)
        .map(|slot| format!(r#"<div class="col-sm-12">{}</div>"#, section(n, slot)))
        .collect();

    format!(
        r#"<article class="ricerca--item clearfix">
             {}
             <a data-sede="{}" href="{}">Visualizza</a>
           </article>"#,
        body,
        code,
        document_url(code, n)
    )
}

/// Complete result container with the five expected sections
pub fn article(code: &str, n: u32) -> String {
    article_with_sections(code, n, 5)
}

/// Pagination control whose last item jumps to `last`
pub fn pagination(last: u32) -> String {
    format!(
        r#"<ul class="pagination">
             <li class="pagination-li"><a onclick="changePage(1)">1</a></li>
             <li class="pagination-li"><a onclick="changePage({})">&raquo;</a></li>
           </ul>"#,
        last
    )
}

/// Full result page: count, containers, trailing footer container
pub fn results_page(total_results: &str, last_page: Option<u32>, articles: &[String]) -> String {
    format!(
        r#"<html><body>
             <p>Risultati trovati: <strong>{}</strong></p>
             {}
             {}
             <article class="footer">Giustizia Amministrativa</article>
           </body></html>"#,
        total_results,
        articles.concat(),
        last_page.map(pagination).unwrap_or_default()
    )
}

/// In-memory portal serving prebuilt pages by index
#[derive(Default)]
pub struct FakePortal {
    pages: BTreeMap<u32, String>,
    /// Page index that fails as if the search form had changed
    pub fail_on: Option<u32>,
    /// Every request received, in order
    pub requests: Vec<(SearchRequest, u32)>,
}

impl FakePortal {
    /// Portal with pages `0..=last_page`, each holding `per_page` verdicts
    ///
    /// Verdict numbers are `page * 100 + i`, so rows identify their page.
    pub fn paginated(code: &str, last_page: u32, per_page: u32) -> Self {
        let total = (last_page + 1) * per_page;
        let pages = (0..=last_page)
            .map(|page| {
                let articles: Vec<String> = (0..per_page)
                    .map(|i| article(code, page * 100 + i + 1))
                    .collect();
                let html = results_page(&total.to_string(), Some(last_page), &articles);
                (page, html)
            })
            .collect();

        Self {
            pages,
            ..Default::default()
        }
    }

    /// Portal serving a single page without pagination control
    pub fn single_page(html: String) -> Self {
        Self {
            pages: BTreeMap::from([(0, html)]),
            ..Default::default()
        }
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.iter().map(|(_, page)| *page).collect()
    }
}

impl SearchPortal for FakePortal {
    fn fetch_page(&mut self, request: &SearchRequest, page: u32) -> Result<String> {
        self.requests.push((request.clone(), page));

        if self.fail_on == Some(page) {
            return Err(Error::form_field_not_found(
                search_form::FORM_ID,
                search_form::STEP_FIELD,
            ));
        }

        // Past the last page the portal keeps serving an empty result list
        Ok(self
            .pages
            .get(&page)
            .cloned()
            .unwrap_or_else(|| results_page("0", None, &[])))
    }
}
