//! End-to-end extraction from parser output in CDP `DOM.getDocument` shape

use dom::{by_id, by_tag, DomArena, DomLoader, NodeId};
use extract::{extract_select, extract_table, extract_table_with, TableOptions, CORNER_LABEL};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn element(tag: &str, attrs: &[&str], children: Vec<Value>) -> Value {
    json!({
        "nodeType": 1,
        "nodeName": tag,
        "attributes": attrs,
        "children": children,
    })
}

fn text(value: &str) -> Value {
    json!({ "nodeType": 3, "nodeName": "#text", "nodeValue": value })
}

fn cell(tag: &str, value: &str) -> Value {
    element(tag, &[], vec![text(value)])
}

fn document(body: Vec<Value>) -> DomArena {
    let response = json!({
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [
                { "nodeType": 10, "nodeName": "html" },
                element("html", &[], vec![element("body", &[], body)]),
            ],
        }
    });
    DomLoader::new().load_document(&response).unwrap()
}

fn find(arena: &DomArena, id: &str) -> NodeId {
    let root = arena.root_id().unwrap();
    arena.first_match(root, by_id(id)).unwrap()
}

fn row(cells: Vec<Value>) -> Value {
    element("tr", &[], cells)
}

fn price_table() -> Value {
    let head = vec![
        cell("th", "Item"),
        cell("th", "Price"),
        cell("th", "Price"),
        cell("th", "Stock"),
    ];
    let stock = vec![text("\n  "), cell("b", "40"), text(" crates")];
    let apple = vec![
        cell("td", "Apple"),
        cell("td", "1.20"),
        cell("td", "1.00"),
        element("td", &[], stock),
    ];
    let pear = vec![cell("td", "Pear"), cell("td", "0.90")];
    let restock = vec![
        cell("td", "Apple"),
        cell("td", "1.30"),
        cell("td", "1.10"),
        cell("td", "12"),
    ];
    let thead = element("thead", &[], vec![row(head)]);
    let tbody = element("tbody", &[], vec![row(apple), row(pear), row(restock)]);
    element("table", &["id", "prices"], vec![thead, tbody])
}

#[test]
fn test_price_table() {
    init_tracing();
    let arena = document(vec![price_table()]);
    let table = find(&arena, "prices");

    let t = extract_table(&arena, table, true, true, "#").unwrap();

    assert_eq!(t.headers(), ["Item", "Price", "Price#_1", "Stock"]);
    assert_eq!(t.index(), ["Item", "Apple", "Pear", "Apple#_1"]);
    assert_eq!(t.element_by_keys("apple", "price").unwrap().0, "1.20");
    let repeat = t.element_by_keys_occurrence("Apple", "Price", 1, 1);
    assert_eq!(repeat.unwrap().0, "1.10");
    assert_eq!(t.element_by_keys("Apple", "Stock").unwrap().0, "40");
    assert_eq!(t.row_by_key("Pear").unwrap().0, ["0.90", "", ""]);
    assert_eq!(t.column_by_key("Stock").unwrap().0, ["40", "", "12"]);
}

#[test]
fn test_composite_cells() {
    let arena = document(vec![price_table()]);
    let table = find(&arena, "prices");

    let options = TableOptions::new()
        .postfix("#")
        .normalizer(dom::utils::collapse_whitespace)
        .composite(" ");
    let t = extract_table_with(&arena, table, &options).unwrap();
    assert_eq!(t.element_by_keys("Apple", "Stock").unwrap().0, "40 crates");
}

#[test]
fn test_table_without_labels() {
    let arena = document(vec![price_table()]);
    let table = find(&arena, "prices");

    let t = extract_table(&arena, table, false, false, "").unwrap();
    assert_eq!(t.headers(), [CORNER_LABEL, "1", "2", "3", "4"]);
    assert_eq!(t.index(), [CORNER_LABEL, "1", "2", "3", "4"]);
    assert_eq!(t.element_at(1, 1), "Item");
    assert_eq!(t.element_at(3, 4), "");
}

#[test]
fn test_table_serializes() {
    let arena = document(vec![price_table()]);
    let table = find(&arena, "prices");
    let t = extract_table(&arena, table, true, true, "#").unwrap();

    let value = serde_json::to_value(&t).unwrap();
    assert_eq!(value["headers"][2], "Price#_1");
    assert_eq!(value["data"][1][0], "0.90");
    assert_eq!(value["postfix"], "#");
}

#[test]
fn test_select_from_document() {
    init_tracing();
    let small = element("option", &["value", "s"], vec![text("Small")]);
    let large = element(
        "option",
        &["value", "l", "selected", ""],
        vec![text("Large")],
    );
    let huge = element("option", &["value", "xl"], vec![text("Huge")]);
    let group = element("optgroup", &["label", "Big"], vec![large, huge]);
    let select = element("select", &["id", "size"], vec![small, group]);
    let arena = document(vec![select]);
    let node = find(&arena, "size");

    let result = extract_select(&arena, node).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.selected_key(), "Large");
    assert_eq!(result.selected_value(), Some("l"));
    assert_eq!(result.value_of("Huge"), Some("xl"));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["selected_key"], "Large");
}

#[test]
fn test_find_table_then_edit_in_place() {
    let mut arena = document(vec![price_table()]);
    let root = arena.root_id().unwrap();
    let table = arena.element_by_tag("table", root).unwrap();

    let first_th = arena.first_match(table, by_tag("th")).unwrap();
    let label = dom::text::first_text_descendant(&arena, first_th).unwrap();
    arena.get_mut(label).unwrap().node_value = "Fruit".to_string();

    let t = extract_table(&arena, table, true, true, "").unwrap();
    assert_eq!(t.headers()[0], "Fruit");
    assert_eq!(t.row_by_key("Fruit").unwrap().1, 0);
}
