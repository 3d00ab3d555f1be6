//! Article import flows: extraction results flowing through the binder into
//! an editing session.

use absketch::binder::{
    ArticleMetadata, ExtractedArticle, ExtractedSection, JournalRef, bind_extracted,
};
use absketch::section::IconRef;
use absketch::services::{ArticleExtractor, ArticleSource, InFlight, ServiceError};
use absketch::session::EditorSession;
use futures::future::BoxFuture;

fn article() -> ExtractedArticle {
    ExtractedArticle {
        metadata: ArticleMetadata {
            title: "Semaglutide in Adolescent Obesity".into(),
            authors: "Weghuber D et al.".into(),
            journal: "NEJM".into(),
            publish_date: "2022-12-15".into(),
        },
        journal: Some(JournalRef {
            key: "endocrinology".into(),
            name: "NEJM".into(),
        }),
        sections: vec![
            ExtractedSection {
                title: "Population".into(),
                description: "201 adolescents with obesity".into(),
                recommended_icon: "patients".into(),
            },
            ExtractedSection {
                title: "Intervention".into(),
                description: "2.4 mg weekly vs placebo".into(),
                recommended_icon: "drug".into(),
            },
            ExtractedSection {
                title: "Findings".into(),
                description: "BMI change -16.1% vs 0.6%".into(),
                recommended_icon: "results chart".into(),
            },
            ExtractedSection {
                title: "Setting".into(),
                description: "Multinational trial sites".into(),
                recommended_icon: "hospital".into(),
            },
            ExtractedSection {
                title: "Outcome".into(),
                description: "Primary endpoint met".into(),
                recommended_icon: "endpoint".into(),
            },
            ExtractedSection {
                title: "Safety".into(),
                description: "GI events more frequent".into(),
                recommended_icon: "warning".into(),
            },
        ],
    }
}

#[test]
fn bound_article_is_one_undoable_step() {
    let mut session = EditorSession::from_template("clinical-trial");
    let template_titles: Vec<String> = session
        .document
        .sections
        .iter()
        .map(|s| s.title.clone())
        .collect();

    bind_extracted(&mut session.document, &article());
    session.commit_sections();

    assert_eq!(session.document.sections[0].title, "POPULATION");
    assert_eq!(session.document.title, "Semaglutide in Adolescent Obesity");
    assert_eq!(session.document.header_color, "#F9A825");
    assert_eq!(
        session.document.citation,
        "Weghuber D et al. NEJM. 2022."
    );

    session.undo();
    let titles: Vec<String> = session
        .document
        .sections
        .iter()
        .map(|s| s.title.clone())
        .collect();
    assert_eq!(titles, template_titles);
}

#[test]
fn sixth_block_lands_in_the_fifth_slot() {
    let mut session = EditorSession::from_template("clinical-trial");
    bind_extracted(&mut session.document, &article());

    assert_eq!(session.document.sections.len(), 5);
    let last = &session.document.sections[4];
    assert_eq!(last.title, "OUTCOME");
    assert!(last.content.ends_with("\n\nSAFETY:\nGI events more frequent"));
}

#[test]
fn recommended_icons_resolve_through_the_glyph_catalog() {
    let mut session = EditorSession::from_template("clinical-trial");
    bind_extracted(&mut session.document, &article());

    let expect = [
        ("population", "group"),
        ("intervention", "pill"),
        ("findings", "bar_chart"),
        ("settings", "domain"),
        ("outcome", "target"),
    ];
    for (id, glyph) in expect {
        assert_eq!(
            session.document.section(id).unwrap().icon(),
            Some(&IconRef::Glyph(glyph.to_owned())),
            "icon of {id}"
        );
    }
}

struct StubExtractor;

impl ArticleExtractor for StubExtractor {
    fn extract(
        &self,
        source: ArticleSource,
    ) -> BoxFuture<'static, Result<ExtractedArticle, ServiceError>> {
        Box::pin(async move {
            match source {
                ArticleSource::Url(url) if url.starts_with("https://") => Ok(article()),
                ArticleSource::Url(url) => Err(ServiceError::Extraction(format!("bad url {url}"))),
                ArticleSource::Upload { .. } => Ok(article()),
            }
        })
    }
}

fn wait<T>(inflight: &mut InFlight<T>) -> Result<T, ServiceError> {
    loop {
        if let Some(result) = inflight.try_take() {
            return result;
        }
        std::thread::yield_now();
    }
}

#[test]
fn extraction_service_feeds_the_binder_asynchronously() {
    let mut session = EditorSession::from_template("meta-analysis");
    let mut inflight = InFlight::idle();
    inflight.dispatch(StubExtractor.extract(ArticleSource::Url("https://example.org/a".into())));

    let extracted = wait(&mut inflight).unwrap();
    bind_extracted(&mut session.document, &extracted);
    session.commit_sections();

    // Three slots, six blocks: the surplus piles into the third.
    assert_eq!(session.document.sections.len(), 3);
    assert!(session.document.sections[2].content.contains("SAFETY:"));
}

#[test]
fn extraction_errors_surface_instead_of_binding() {
    let mut inflight = InFlight::idle();
    inflight.dispatch(StubExtractor.extract(ArticleSource::Url("ftp://nope".into())));
    match wait(&mut inflight) {
        Err(ServiceError::Extraction(msg)) => assert!(msg.contains("ftp://nope")),
        other => panic!("expected extraction error, got {:?}", other.map(|a| a.metadata.title)),
    }
}
