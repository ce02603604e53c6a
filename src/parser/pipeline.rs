//! The three passes over a fragment stream: calibrate, classify, build.

use chrono::Utc;

use super::builder::DocumentBuilder;
use super::classifier::{Classification, DropReason, FragmentClassifier};
use super::config::CalibrationConfig;
use super::options::BuildOptions;
use super::report::{BuildReport, ClassifiedFragment, Conversion, Diagnostic};
use super::resolver::StyleResolver;
use crate::error::Result;
use crate::model::{Document, Fragment, StoryIdGenerator};

/// Convert a fragment stream into a document.
///
/// Story ids are drawn from `ids`; pass the same generator to several calls
/// to keep ids unique across documents. Only calibration and configuration
/// problems are errors.
pub fn build_document(
    fragments: &[Fragment],
    config: &CalibrationConfig,
    options: &BuildOptions,
    ids: &mut StoryIdGenerator,
) -> Result<Conversion> {
    config.validate()?;

    let calibration = StyleResolver::new(config)
        .with_title_page(options.title_page)
        .resolve(fragments)?;

    let mut report = BuildReport::new();
    report.diagnostics.extend(calibration.diagnostics);

    let mut classifier = FragmentClassifier::new(&calibration.styles, config)
        .with_title_page(options.title_page)
        .with_dedupe(options.dedupe_consecutive);
    let mut builder = DocumentBuilder::new(ids, &calibration.positions, options);

    let mut page_count = 0;
    for fragment in fragments {
        if !options.pages.includes(fragment.page()) {
            continue;
        }
        report.stats.fragments_seen += 1;
        page_count = page_count.max(fragment.page() + 1);

        match classifier.classify(fragment) {
            Classification::Stop => {
                report.stats.stopped = true;
                break;
            }
            Classification::Drop(reason) => {
                report.stats.fragments_dropped += 1;
                if reason == DropReason::UnknownStyle {
                    log::warn!(
                        "unknown style {} for '{}' at {}",
                        fragment.style,
                        fragment.text,
                        fragment.location
                    );
                    report.diagnostics.push(Diagnostic::unknown_style(fragment));
                }
            }
            Classification::Keep(style) => {
                report.stats.fragments_kept += 1;
                builder.push(style, fragment);
                report.trace.push(ClassifiedFragment::new(style, fragment.clone()));
            }
        }
    }

    let (stories, mismatches) = builder.finish();
    report.diagnostics.extend(mismatches);

    let mut document = Document::new(options.document_name.clone());
    document.stories = stories;
    document.metadata.page_count = page_count;
    document.metadata.fragment_count = report.stats.fragments_seen;
    document.metadata.stopped_early = report.stats.stopped;
    document.metadata.converted_at = Some(Utc::now());
    report.stats.tally(&document);

    log::debug!(
        "built {} stories from {} fragments ({} kept)",
        report.stats.story_count,
        report.stats.fragments_seen,
        report.stats.fragments_kept
    );

    Ok(Conversion { document, report })
}
