//! Benchmarks for pdfstory conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks convert synthetic fragment streams shaped like a
//! campaign module: headings, prose, bullet lists and tables.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfstory::{
    CalibrationConfig, Fragment, Location, Origin, Pdfstory, SemanticStyle, StyleSignature,
};

fn signature(font: &str, size: f32) -> StyleSignature {
    StyleSignature::new(font, size, 4, 0x231f20)
}

fn fragment(page: u32, line: u32, text: &str, style: &StyleSignature, x: f32) -> Fragment {
    Fragment::new(
        text,
        style.clone(),
        Origin::new(x, 80.0 + line as f32 * 12.0),
        Location::new(page, 0, line, 0),
    )
}

/// Creates a synthetic fragment stream with the given number of pages.
fn create_fragments(page_count: u32) -> Vec<Fragment> {
    let heading = signature("MrEaves", 23.0);
    let body = signature("Bookinsanity", 9.5);
    let bold = signature("Bookinsanity-Bold", 9.5);
    let bullet = signature("Dingbats", 9.5);
    let table_heading = signature("Scaly-Bold", 9.0);
    let table_text = signature("Scaly", 9.0);

    let mut fragments = vec![fragment(0, 0, "Benchmark Module", &bold, 100.0)];
    for page in 1..=page_count {
        let mut line = 0;
        let mut push = |text: String, style: &StyleSignature, x: f32| {
            fragments.push(fragment(page, line, &text, style, x));
            line += 1;
        };

        push(format!("Chapter {}", page), &heading, 54.0);
        for sentence in 0..20 {
            push(format!("Sentence {} of page {} runs on ", sentence, page), &body, 54.0);
            push("and ends here.".to_string(), &body, 200.0);
        }
        for item in 0..5 {
            push("•".to_string(), &bullet, 60.0);
            push(format!("Item {}", item), &bold, 70.0);
        }
        for column in ["d6", "Creature", "Number"] {
            push(column.to_string(), &table_heading, 54.0);
        }
        for row in 0..6 {
            push(row.to_string(), &table_text, 54.0);
            push(format!("Goblin {}", row), &table_text, 90.0);
            push(format!("{}d4", row), &table_text, 160.0);
        }
    }
    fragments
}

fn config() -> CalibrationConfig {
    CalibrationConfig::new()
        .with_style_anchor(SemanticStyle::Heading1, "Chapter 1")
        .with_style_anchor(SemanticStyle::Body, "Sentence 0")
        .with_style_anchor(SemanticStyle::BodyBold, "Item 0")
        .with_style_anchor(SemanticStyle::Bullet, "•")
        .with_style_anchor(SemanticStyle::TableHeading, "Creature")
        .with_style_anchor(SemanticStyle::TableText, "Goblin 0")
}

/// Benchmark conversion at various sizes.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for page_count in [1, 10, 100].iter() {
        let fragments = create_fragments(*page_count);
        let config = config();

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let mut converter = Pdfstory::new(config.clone());
                converter.run(black_box(&fragments)).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark fragment input parsing.
fn bench_fragment_parsing(c: &mut Criterion) {
    let fragments = create_fragments(10);
    let json = serde_json::to_string(&fragments).unwrap();

    c.bench_function("parse_fragment_array", |b| {
        b.iter(|| pdfstory::parse_fragments(black_box(&json)).unwrap());
    });
}

criterion_group!(benches, bench_conversion, bench_fragment_parsing);
criterion_main!(benches);
