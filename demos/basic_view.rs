/// Basic View Example
///
/// This example demonstrates:
/// - Loading a dataset from JSON through a data source
/// - Toggling sort directives and setting column filters
/// - Rendering the derived view as text after each intent

use tableview::{load, Intent, StaticSource, TextRenderer, ViewConfig, ViewReducer, COUNTRY_FIELDS};

const COUNTRIES: &str = r#"[
    {"name": "Ecuador", "region": "Americas", "alpha2Code": "EC", "alpha3Code": "ECU", "population": 16545799},
    {"name": "Egypt", "region": "Africa", "alpha2Code": "EG", "alpha3Code": "EGY", "population": 91290000},
    {"name": "Estonia", "region": "Europe", "alpha2Code": "EE", "alpha3Code": "EST", "population": 1315944},
    {"name": "Ethiopia", "region": "Africa", "alpha2Code": "ET", "alpha3Code": "ETH", "population": 92206005},
    {"name": "Fiji", "region": "Oceania", "alpha2Code": "FJ", "alpha3Code": "FJI", "population": 867000},
    {"name": "Finland", "region": "Europe", "alpha2Code": "FI", "alpha3Code": "FIN", "population": 5491817},
    {"name": "France", "region": "Europe", "alpha2Code": "FR", "alpha3Code": "FRA", "population": 66710000},
    {"name": "Gabon", "region": "Africa", "alpha2Code": "GA", "alpha3Code": "GAB", "population": 1802278},
    {"name": "Georgia", "region": "Asia", "alpha2Code": "GE", "alpha3Code": "GEO", "population": 3720400}
]"#;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== TableView Basic Example ===\n");

    let source = match StaticSource::from_json(COUNTRIES, &COUNTRY_FIELDS) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Could not parse sample data: {}", e);
            return;
        }
    };

    let mut reducer = ViewReducer::new(ViewConfig::default());
    println!("1. Before loading:\n{}\n", TextRenderer::render_to_string(&reducer));

    let loaded = load(&mut reducer, &source).await;
    println!("2. Loaded {} records:\n{}\n", loaded, TextRenderer::render_to_string(&reducer));

    let steps = [
        ("Sort by name", Intent::ToggleSort { column: "name".to_string() }),
        ("Sort by name again (descending)", Intent::ToggleSort { column: "name".to_string() }),
        ("Filter region with 'eu' (too short, ignored)", Intent::SetFilter { column: "region".to_string(), text: "eu".to_string() }),
        ("Filter region with 'eur'", Intent::SetFilter { column: "region".to_string(), text: "eur".to_string() }),
        ("Sort by region (not sortable)", Intent::ToggleSort { column: "region".to_string() }),
    ];

    for (i, (label, intent)) in steps.iter().enumerate() {
        let outcome = reducer.apply(intent);
        println!("{}. {}", i + 3, label);
        if let Err(e) = outcome {
            println!("   rejected: {}", e);
        }
        println!("{}\n", TextRenderer::render_to_string(&reducer));
    }
}
