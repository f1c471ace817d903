/// Paging Example
///
/// This example demonstrates:
/// - The sliding page-number window and its truncation marker
/// - Previous/next navigation clamped to the first and last page
/// - Jumping past the last page

use tableview::{Dataset, Record, Renderer, TextRenderer, ViewConfig, ViewReducer};

fn main() {
    println!("=== TableView Paging Example ===\n");

    let dataset: Dataset = (1..=30i64)
        .map(|i| {
            Record::new()
                .with("name", format!("Country {:02}", i))
                .with("region", if i % 3 == 0 { "Asia" } else { "Europe" })
                .with("population", i * 250_000)
        })
        .collect();

    let mut reducer = ViewReducer::with_dataset(ViewConfig::default(), dataset);
    let mut renderer = TextRenderer::new();

    renderer.render(&reducer);
    println!("Page 1:\n{}\n", renderer.frame());

    for _ in 0..4 {
        reducer.next_page();
    }
    renderer.render(&reducer);
    println!("After four 'Next' clicks:\n{}\n", renderer.frame());

    let _ = reducer.go_to_page(8);
    renderer.render(&reducer);
    println!("Last page:\n{}\n", renderer.frame());
    println!("'Next' on the last page stays on page {}\n", reducer.next_page());

    let _ = reducer.go_to_page(20);
    renderer.render(&reducer);
    println!("Past the end:\n{}\n", renderer.frame());
}
