use crate::db::models::Candidate;
use crate::error::TallyError;
use crate::tally::TallySummary;
use axum::response::Html;
use minijinja::{Environment, context};
use std::sync::Arc;

pub const INDEX: &str = "index.html";
pub const BREAK: &str = "break.html";
pub const ADMIN: &str = "admin.html";

/// Compiled page templates, shared by every handler.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, TallyError> {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("../templates/layout.html"))?;
        env.add_template("live.html", include_str!("../templates/live.html"))?;
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        env.add_template(BREAK, include_str!("../templates/break.html"))?;
        env.add_template(ADMIN, include_str!("../templates/admin.html"))?;

        Ok(Views { env: Arc::new(env) })
    }

    pub fn render_tally(
        &self,
        template: &str,
        candidates: &[Candidate],
        summary: &TallySummary,
    ) -> Result<Html<String>, TallyError> {
        let html = self.env.get_template(template)?.render(context! {
            candidates => candidates,
            total_votes => summary.total_votes,
            percent => summary.percent_label(),
        })?;

        Ok(Html(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Candidate>, TallySummary) {
        let candidates = vec![
            Candidate {
                id: 1,
                name: "Ayu <script>".to_string(),
                partner: Some("Budi".to_string()),
                photo: Some("/uploads/1.png".to_string()),
                votes: 100,
            },
            Candidate {
                id: 2,
                name: "Citra".to_string(),
                partner: None,
                photo: None,
                votes: 250,
            },
        ];
        let summary = TallySummary::from_candidates(&candidates, 1539);
        (candidates, summary)
    }

    #[test]
    fn every_template_renders_totals() {
        let views = Views::new().unwrap();
        let (candidates, summary) = sample();

        for template in [INDEX, BREAK, ADMIN] {
            let Html(html) = views.render_tally(template, &candidates, &summary).unwrap();
            assert!(html.contains("350"), "{template} is missing the total");
            assert!(html.contains("22.7"), "{template} is missing the percentage");
            assert!(html.contains("Citra"), "{template} is missing a candidate");
        }
    }

    #[test]
    fn escapes_candidate_names() {
        let views = Views::new().unwrap();
        let (candidates, summary) = sample();

        let Html(html) = views.render_tally(INDEX, &candidates, &summary).unwrap();

        assert!(html.contains("Ayu &lt;script&gt;"));
        assert!(html.contains("1.png"));
    }

    #[test]
    fn admin_page_has_both_forms() {
        let views = Views::new().unwrap();
        let (candidates, summary) = sample();

        let Html(html) = views.render_tally(ADMIN, &candidates, &summary).unwrap();

        assert!(html.contains(r#"action="/add-candidate""#));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"action="/update""#));
        assert!(html.contains(r#"name="votes""#));
    }
}
