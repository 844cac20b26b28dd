//! End-to-end tests for the examples_schema rule over YAML documents.

use specimen::{Diagnostic, Document, ExamplesSchema, Rule};

fn run(yaml: &str) -> Vec<Diagnostic> {
    let document = Document::from_yaml_str(yaml).unwrap();
    ExamplesSchema::new().run(&document)
}

#[test]
fn test_valid_schema_examples() {
    let res = run(r#"openapi: 3.1
components:
  schemas:
    Herbs:
      type: object
      properties:
        id:
          type: string
      examples:
        - id: smoked"#);

    assert!(res.is_empty());
}

#[test]
fn test_nested_property_examples_with_format() {
    let res = run(r#"openapi: 3.1
components:
  schemas:
    Station:
      type: object
      properties:
        id:
          type: string
          format: uuid
          examples:
            - efdbb9d1-02c2-4bc3-afb7-6788d8782b1e
            - b2e783e1-c824-4d63-b37a-d8d698862f1d"#);

    assert!(res.is_empty());
}

#[test]
fn test_additional_property_not_allowed() {
    let res = run(r#"openapi: 3.1
components:
  schemas:
    Herbs:
      type: object
      properties:
        id:
          type: string
      additionalProperties: false
      examples:
        - id: smoked
          name: illegal"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "additional properties 'name' not allowed");
    assert_eq!(res[0].path, "$.components.schemas['Herbs'].examples[0]");
}

const HERBS_ONE_OF: &str = r#"openapi: 3.1
components:
  schemas:
    Herbs:
      type: object
      properties:
        id:
          oneOf:
            - type: string
              const: smoked
            - type: integer
              const: 1
"#;

#[test]
fn test_one_of_string_alternative() {
    let res = run(&format!("{}      examples:\n        - id: smoked", HERBS_ONE_OF));
    assert!(res.is_empty());
}

#[test]
fn test_one_of_integer_alternative() {
    let res = run(&format!("{}      examples:\n        - id: 1", HERBS_ONE_OF));
    assert!(res.is_empty());
}

#[test]
fn test_one_of_no_alternative_matches() {
    let res = run(&format!("{}      examples:\n        - id: eaten", HERBS_ONE_OF));

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].message, "value must be 'smoked'");
    assert_eq!(res[0].path, "$.components.schemas['Herbs'].examples[0]");
    assert_eq!(res[1].message, "got string, want integer");
    assert_eq!(res[1].path, "$.components.schemas['Herbs'].examples[0]");
}

#[test]
fn test_singular_example_valid() {
    let res = run(&format!("{}      example:\n        id: smoked", HERBS_ONE_OF));
    assert!(res.is_empty());
}

#[test]
fn test_singular_example_invalid() {
    let res = run(&format!("{}      example:\n        id: baked", HERBS_ONE_OF));

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].message, "value must be 'smoked'");
    assert_eq!(res[0].path, "$.components.schemas['Herbs'].example");
    assert_eq!(res[1].message, "got string, want integer");
    assert_eq!(res[1].path, "$.components.schemas['Herbs'].example");
}

#[test]
fn test_parameter_with_list_examples_is_ignored() {
    let res = run(r#"openapi: 3.1
components:
  parameters:
    Herbs:
      in: header
      name: herbs
      schema:
        type: object
        properties:
          id:
            type: string
            const: spicy
      examples:
        - id: spicy"#);

    assert!(res.is_empty());
}

#[test]
fn test_parameter_named_example_invalid() {
    let res = run(r#"openapi: 3.1
components:
  parameters:
    Herbs:
      in: header
      name: herbs
      schema:
        type: object
        properties:
          id:
            type: string
            const: spicy
      examples:
        sammich:
          value:
            id: crispy"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "value must be 'spicy'");
    assert_eq!(res[0].path, "$.components.parameters['Herbs'].examples['sammich']");
}

#[test]
fn test_header_named_example_invalid() {
    let res = run(r#"openapi: 3.1
paths:
  /herbs:
    get:
      responses:
        "200":
          headers:
            "Herbs":
              schema:
                type: string
                const: tasty
              examples:
                sammich:
                  value: crispy
"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "value must be 'tasty'");
    assert_eq!(
        res[0].path,
        "$.paths['/herbs'].get.responses['200'].headers['Herbs'].examples['sammich']"
    );
}

#[test]
fn test_media_type_named_example_invalid() {
    let res = run(r#"openapi: 3.1
paths:
  /herbs:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                type: string
                const: tasty
              examples:
                sammich:
                  value: crispy
"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "value must be 'tasty'");
    assert_eq!(
        res[0].path,
        "$.paths['/herbs'].get.responses['200'].content['application/json'].examples['sammich']"
    );
}

#[test]
fn test_date_time_format_is_permissive() {
    let res = run(r#"openapi: 3.1
components:
  schemas:
    badDate:
      type: string
      description: a bad time.
      format: date-time
      example: 2022-08-07T12:12:00Z"#);

    assert!(res.is_empty());
}

#[test]
fn test_singular_array_example() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Test:
      type: array
      description: Test array with numbers
      items:
        type: number
      example:
        - 0
        - 0
        - 0"#);

    assert!(res.is_empty());
}

#[test]
fn test_error_messages_nested_nullable() {
    let res = run(r#"openapi: 3.0.0
components:
  schemas:
    ErrorMessages:
      description: error object with HTTP responseCode and array of error messages
      properties:
        errorDetails:
          items:
            properties:
              code:
                description: Error message code
                type: string
              detail:
                description: Detailed error description
                nullable: true
                type: string
              message:
                description: Information of the error
                type: string
            type: object
          type: array
        message:
          type: string
        responseCode:
          description: Error code
          example: 400
          format: int32
          maximum: 600
          minimum: 100
          type: integer
      type: object
      examples:
        - errorDetails:
            - code: "AP103"
              detail: "agent.generalAgency.nationalProducerNumber"
              message: "nationalProducerNumber should be <= 10 characters in length"
          message: "Request Payload Validation Error Occurred"
          responseCode: 400
        - errorDetails:
            - code: "GE004"
              detail: null
              message: "Invalid credentials provided"
          message: "Unauthorized"
          responseCode: 401"#);

    assert!(res.is_empty(), "unexpected diagnostics: {:?}", res);
}

#[test]
fn test_nested_array_mismatches_report_example_path() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Batch:
      type: object
      properties:
        codes:
          type: array
          items:
            type: integer
      examples:
        - codes: [1, two, 3, four]"#);

    assert_eq!(res.len(), 2);
    assert!(res
        .iter()
        .all(|d| d.path == "$.components.schemas['Batch'].examples[0]"));
    assert_eq!(res[0].message, "got string, want integer");
    assert_eq!(res[1].message, "got string, want integer");
}

#[test]
fn test_missing_required_property() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Herb:
      type: object
      required: [id, name]
      properties:
        id:
          type: string
      example:
        id: basil"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "missing required property 'name'");
    assert_eq!(res[0].code, "required");
    assert_eq!(res[0].path, "$.components.schemas['Herb'].example");
}

#[test]
fn test_request_body_and_path_parameters() {
    let res = run(r#"openapi: 3.0.3
paths:
  /herbs/{id}:
    parameters:
      - name: id
        in: path
        schema:
          type: integer
        example: basil
    put:
      requestBody:
        content:
          application/json:
            schema:
              type: object
              properties:
                name:
                  type: string
            example:
              name: 7"#);

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].message, "got string, want integer");
    assert_eq!(res[0].path, "$.paths['/herbs/{id}'].parameters[0].example");
    assert_eq!(res[1].message, "got integer, want string");
    assert_eq!(
        res[1].path,
        "$.paths['/herbs/{id}'].put.requestBody.content['application/json'].example"
    );
}

#[test]
fn test_local_refs_resolve_for_named_examples() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Flavor:
      type: string
      enum: [sweet, sour]
  headers:
    X-Flavor:
      schema:
        $ref: '#/components/schemas/Flavor'
      examples:
        good:
          value: sweet
        bad:
          value: bitter"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "value must be one of 'sweet', 'sour'");
    assert_eq!(res[0].path, "$.components.headers['X-Flavor'].examples['bad']");
}

#[test]
fn test_swagger_response_examples() {
    let res = run(r#"swagger: "2.0"
paths:
  /herbs:
    get:
      responses:
        200:
          schema:
            type: object
            properties:
              id:
                type: integer
          examples:
            application/json:
              id: basil"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "got string, want integer");
    assert_eq!(
        res[0].path,
        "$.paths['/herbs'].get.responses['200'].examples['application/json']"
    );
}

#[test]
fn test_unusual_schema_shapes_never_fail_the_rule() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Weird:
      type: 42
      properties: not-a-map
      items: [1, 2]
      example: anything
    Remote:
      $ref: 'other.yaml#/Thing'
      example: whatever
    Bool:
      properties:
        flag: true
      example:
        flag: 3"#);

    assert!(res.is_empty());
}

#[test]
fn test_idempotent() {
    let document = Document::from_yaml_str(&format!(
        "{}      examples:\n        - id: eaten\n        - id: 2",
        HERBS_ONE_OF
    ))
    .unwrap();
    let rule = ExamplesSchema::new();

    let first = rule.run(&document);
    let second = rule.run(&document);

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn test_branching_recursive_schema_at_default_depth() {
    let res = run(r#"openapi: 3.1.0
components:
  schemas:
    Node:
      type: object
      properties:
        value:
          type: integer
        left:
          $ref: '#/components/schemas/Node'
        right:
          $ref: '#/components/schemas/Node'
      example:
        value: 1
        left:
          value: 2
          right:
            value: three
  parameters:
    Tree:
      in: query
      name: tree
      schema:
        $ref: '#/components/schemas/Node'
paths:
  /trees:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/Node'
            examples:
              deep:
                value:
                  left:
                    left:
                      left:
                        right:
                          value: 5.5"#);

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].message, "got string, want integer");
    assert_eq!(res[0].path, "$.components.schemas['Node'].example");
    assert_eq!(res[1].message, "got number, want integer");
    assert_eq!(
        res[1].path,
        "$.paths['/trees'].post.requestBody.content['application/json'].examples['deep']"
    );
}

#[test]
fn test_mutually_recursive_schemas_at_default_depth() {
    let res = run(r#"openapi: 3.0.3
components:
  schemas:
    A:
      type: object
      properties:
        b:
          $ref: '#/components/schemas/B'
      example:
        b:
          a:
            b:
              a: false
    B:
      type: object
      nullable: true
      properties:
        a:
          $ref: '#/components/schemas/A'
      example:
        a:
          b: null
    Loop:
      $ref: '#/components/schemas/Loop'
    UsesLoop:
      type: object
      properties:
        anything:
          $ref: '#/components/schemas/Loop'
      example:
        anything: [1, 2]"#);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].message, "got boolean, want object");
    assert_eq!(res[0].path, "$.components.schemas['A'].example");
}
