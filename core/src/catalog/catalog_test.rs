use super::*;
use crate::evaluator::Evaluator;
use crate::ops::Registry;
use pretty_assertions::assert_eq;

#[test]
fn test_catalog_matches_registry() {
    let registry = Registry::standard();
    let mut names: Vec<_> = catalog().iter().map(|spec| spec.name).collect();
    names.sort_unstable();
    assert_eq!(names, registry.names());
}

#[test]
fn test_lookup() {
    let spec = lookup("np.reshape").unwrap();
    assert_eq!(spec.category, Category::ArrayManipulation);
    assert_eq!(spec.inputs, &["a", "newshape"]);
    assert!(lookup("np.fft").is_none());
    assert!(lookup("reshape").is_none());
}

#[test]
fn test_categories_in_first_seen_order() {
    assert_eq!(
        categories(),
        vec![
            Category::ArrayCreation,
            Category::Mathematical,
            Category::Statistics,
            Category::LinearAlgebra,
            Category::ArrayManipulation,
        ]
    );
}

#[test]
fn test_category_labels() {
    assert_eq!(Category::LinearAlgebra.to_string(), "Linear Algebra");
    assert_eq!(
        Category::from_label("array manipulation"),
        Some(Category::ArrayManipulation)
    );
    assert_eq!(Category::from_label("Signal"), None);
}

#[test]
fn test_default_params() {
    let params = default_params("np.linspace").unwrap();
    assert_eq!(params.get("start"), Some("0"));
    assert_eq!(params.get("stop"), Some("10"));
    assert_eq!(params.get("num"), Some("50"));

    // `axis` has no default and stays out.
    let params = default_params("np.mean").unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("axis"), None);

    assert!(default_params("np.fft").is_none());
}

#[test]
fn test_defaults_agree_with_operations() {
    let evaluator = Evaluator::default();
    for spec in catalog() {
        let prefilled = evaluator.evaluate(spec.name, &default_params(spec.name).unwrap());
        let empty = evaluator.evaluate(spec.name, &Params::new());
        assert_eq!(prefilled, empty, "{}", spec.name);
    }
}

#[test]
fn test_serialized_entry() {
    let json = serde_json::to_value(lookup("np.zeros").unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "np.zeros",
            "category": "Array Creation",
            "description": "Create array filled with zeros",
            "inputs": ["shape", "dtype"],
            "outputs": ["ndarray"],
            "params": [
                {"name": "shape", "kind": "tuple", "required": true, "default": "(3, 3)"},
                {"name": "dtype", "kind": "string", "required": false, "default": "float64"},
            ],
        })
    );
}
