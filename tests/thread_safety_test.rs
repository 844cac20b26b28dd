//! Tests for running rules concurrently over a shared document.

use specimen::{Document, ExamplesSchema, Rule};
use std::sync::Arc;
use std::thread;

const HERBS: &str = r#"openapi: 3.1.0
components:
  schemas:
    Herbs:
      type: object
      properties:
        id:
          type: integer
      examples:
        - id: 1
        - id: basil
        - id: 3
"#;

#[test]
fn test_concurrent_rule_runs() {
    let document = Arc::new(Document::from_yaml_str(HERBS).unwrap());
    let expected = ExamplesSchema::new().with_parallel(false).run(&document);
    assert_eq!(expected.len(), 1);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let document = Arc::clone(&document);
            thread::spawn(move || ExamplesSchema::new().run(&document))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_shared_rule_instance() {
    let document = Arc::new(Document::from_yaml_str(HERBS).unwrap());
    let rule: Arc<dyn Rule> = Arc::new(ExamplesSchema::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let document = Arc::clone(&document);
            let rule = Arc::clone(&rule);
            thread::spawn(move || {
                let diagnostics = rule.run(&document);
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(
                    diagnostics[0].path,
                    "$.components.schemas['Herbs'].examples[1]"
                );
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_many_sites_keep_discovery_order() {
    let mut yaml = String::from("openapi: 3.1.0\ncomponents:\n  schemas:\n");
    for i in 0..200 {
        yaml.push_str(&format!(
            "    S{i}:\n      type: string\n      example: {i}\n"
        ));
    }
    let document = Document::from_yaml_str(&yaml).unwrap();

    let parallel = ExamplesSchema::new().with_parallel(true).run(&document);
    let sequential = ExamplesSchema::new().with_parallel(false).run(&document);

    assert_eq!(parallel.len(), 200);
    assert_eq!(parallel, sequential);
    assert_eq!(parallel[0].path, "$.components.schemas['S0'].example");
    assert_eq!(parallel[199].path, "$.components.schemas['S199'].example");
}
