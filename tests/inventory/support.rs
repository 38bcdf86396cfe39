//! Shelf fixtures and screen helpers for the ingredient inventory.

use barkeep::bar::{
    Ingredient, IngredientDisplay, IngredientListDisplay, IngredientListProjector,
    IngredientProjector, IngredientValidator,
};
use barkeep::screen::{DetailScreen, ListScreen};
use barkeep::{AlwaysValid, BarkeepConfig, InMemoryStore, RecordingSink, SessionOptions};

pub type IngredientDetail = DetailScreen<Ingredient, IngredientValidator, IngredientProjector>;
pub type IngredientList = ListScreen<Ingredient, AlwaysValid, IngredientListProjector>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Five bottles; the "A" section holds exactly one.
pub fn shelf() -> Vec<Ingredient> {
    vec![
        Ingredient::new("campari", "Campari").with_amount(700.0).with_tags(["bitter", "aperitivo"]),
        Ingredient::new("gin", "Gin").with_amount(500.0).with_tags(["spirit"]),
        Ingredient::new("angostura", "Angostura").with_amount(120.0).with_tags(["bitters"]),
        Ingredient::new("cointreau", "Cointreau").with_amount(350.0).with_tags(["liqueur"]),
        Ingredient::new("grenadine", "grenadine").with_amount(0.0).out_of_stock(),
    ]
}

pub fn store() -> InMemoryStore<Vec<Ingredient>> {
    init_tracing();
    InMemoryStore::new(shelf())
}

pub fn open_list(
    store: &InMemoryStore<Vec<Ingredient>>,
) -> (IngredientList, RecordingSink<IngredientListDisplay>) {
    let sink = RecordingSink::new();
    let config = BarkeepConfig::default();
    let list = ListScreen::open(
        store,
        AlwaysValid,
        IngredientListProjector::new(config.grouping),
        sink.clone(),
        &config,
    );
    (list, sink)
}

pub fn open_detail(
    store: &InMemoryStore<Vec<Ingredient>>,
    id: &str,
) -> (IngredientDetail, RecordingSink<IngredientDisplay>) {
    let sink = RecordingSink::new();
    let detail = DetailScreen::open(
        store,
        id,
        IngredientValidator::default(),
        IngredientProjector::default(),
        sink.clone(),
        SessionOptions::default(),
    )
    .expect("ingredient exists");
    (detail, sink)
}

pub fn create_detail(
    store: &InMemoryStore<Vec<Ingredient>>,
    id: &str,
) -> (IngredientDetail, RecordingSink<IngredientDisplay>) {
    let sink = RecordingSink::new();
    let detail = DetailScreen::create(
        store,
        Ingredient::new(id, ""),
        IngredientValidator::default(),
        IngredientProjector::default(),
        sink.clone(),
        SessionOptions::default(),
    );
    (detail, sink)
}

pub fn names(items: &[Ingredient]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}
