use apidocs_core::{
    created, not_found, ok, ApiDocs, ApiDocsBuilder, AppError, Describe, DocsConfig,
    DocumentConfig, Example, HttpMethod, Information, Metadata, PropertyDef, Resource,
    RouteRegistration, Served, TypeCatalog, TypeDef, TypeOccurrence, TypeRef,
};
use pretty_assertions::assert_eq;
use serde_json::json;

struct Pet;
struct Pets;
struct PetById;

impl Describe for Pet {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::named("Pet")
    }
}

impl Describe for Pets {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::named("Pets")
    }
}

impl Describe for PetById {
    fn occurrence() -> TypeOccurrence {
        TypeOccurrence::named("PetById")
    }
}

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog
        .define_all([
            TypeDef::enumeration("PetStatus", &["available", "sold"])
                .with_serial_name("sold", "SOLD"),
            TypeDef::object("Pet")
                .with_property(PropertyDef::new("id", TypeRef::named("Long")))
                .with_property(PropertyDef::new("name", TypeRef::named("String")))
                .with_property(PropertyDef::new("status", TypeRef::named("PetStatus")))
                .with_property(
                    PropertyDef::new("tags", "Set<String>".parse().unwrap()).nullable(),
                ),
            TypeDef::object("Pets").with_property(
                PropertyDef::new("limit", TypeRef::named("Int")).with_default("20"),
            ),
            TypeDef::object("PetById")
                .with_property(PropertyDef::new("id", TypeRef::named("Long"))),
        ])
        .unwrap();
    catalog
}

fn config() -> DocsConfig {
    let info = Information::new("Petstore", "1.0.0");
    DocsConfig::default()
        .with_swagger(DocumentConfig::new(info.clone()))
        .with_openapi(DocumentConfig::new(info))
}

fn petstore() -> ApiDocsBuilder {
    let mut builder = ApiDocsBuilder::new(config(), catalog()).unwrap();

    builder
        .route(
            HttpMethod::Get,
            Resource::of::<Pets>("/pets").with_group("pets"),
            Metadata::summary("List pets").responds(ok::<Vec<Pet>>()),
        )
        .unwrap();
    builder
        .route_with_body::<Pet>(
            HttpMethod::Post,
            Resource::of::<()>("/pets").with_group("pets"),
            Metadata::summary("Create a pet")
                .example("rex", Example::new(json!({ "name": "Rex" })))
                .responds(created::<Pet>()),
        )
        .unwrap();
    builder
        .route(
            HttpMethod::Get,
            Resource::of::<PetById>("/pets/{id}").with_group("pets"),
            Metadata::summary("Find a pet")
                .responds(ok::<Pet>())
                .responds(not_found()),
        )
        .unwrap();

    builder
}

#[test]
fn test_openapi_document() {
    let docs = petstore().build().unwrap();

    let expected = json!({
        "openapi": "3.0.0",
        "info": { "title": "Petstore", "version": "1.0.0" },
        "paths": {
            "/pets": {
                "get": {
                    "tags": ["pets"],
                    "summary": "List pets",
                    "parameters": [{
                        "name": "limit",
                        "in": "query",
                        "description": "limit",
                        "required": false,
                        "schema": { "type": "integer", "format": "int32", "default": "20" }
                    }],
                    "responses": {
                        "200": {
                            "description": "ListOfPet",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ListOfPet" }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "tags": ["pets"],
                    "summary": "Create a pet",
                    "parameters": [],
                    "requestBody": {
                        "description": "Pet",
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Pet" },
                                "examples": { "rex": { "value": { "name": "Rex" } } }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Pet",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        }
                    }
                }
            },
            "/pets/{id}": {
                "get": {
                    "tags": ["pets"],
                    "summary": "Find a pet",
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "description": "id",
                        "required": true,
                        "schema": { "type": "integer", "format": "int64" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Pet",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        },
                        "404": { "description": "Not Found" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "ListOfPet": {
                    "type": "array",
                    "items": { "$ref": "#/components/schemas/Pet" }
                },
                "Pet": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string" },
                        "status": { "type": "string", "enum": ["available", "SOLD"] },
                        "tags": {
                            "type": "array",
                            "items": { "type": "string" },
                            "uniqueItems": true
                        }
                    }
                }
            }
        }
    });

    assert_eq!(docs.openapi().unwrap(), &expected);
}

#[test]
fn test_swagger_operations() {
    let docs = petstore().build().unwrap();
    let swagger = docs.swagger().unwrap();

    assert_eq!(swagger["swagger"], "2.0");
    assert_eq!(
        swagger["paths"]["/pets"]["get"],
        json!({
            "tags": ["pets"],
            "summary": "List pets",
            "consumes": ["application/json"],
            "produces": ["application/json"],
            "parameters": [{
                "name": "limit",
                "in": "query",
                "description": "limit",
                "required": false,
                "type": "integer",
                "format": "int32",
                "default": "20"
            }],
            "responses": {
                "200": {
                    "description": "ListOfPet",
                    "schema": { "$ref": "#/definitions/ListOfPet" }
                }
            }
        })
    );
    assert_eq!(
        swagger["paths"]["/pets"]["post"]["parameters"][0],
        json!({
            "name": "body",
            "in": "body",
            "description": "Pet",
            "required": true,
            "schema": { "$ref": "#/definitions/Pet" },
            "x-examples": { "rex": { "value": { "name": "Rex" } } }
        })
    );
    assert_eq!(
        swagger["definitions"]["ListOfPet"],
        json!({ "type": "array", "items": { "$ref": "#/definitions/Pet" } })
    );
}

#[test]
fn test_list_response_registers_one_object_and_one_array() {
    let builder = petstore();
    let registry = builder.openapi().unwrap().registry();

    let names: Vec<&str> = registry.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["ListOfPet", "Pet"]);
}

#[test]
fn test_same_path_and_method_last_writer_wins() {
    let mut builder = petstore();
    builder
        .route(
            HttpMethod::Get,
            Resource::of::<Pets>("/pets").with_group("pets"),
            Metadata::summary("List pets again").responds(ok::<Vec<Pet>>()),
        )
        .unwrap();

    let docs = builder.build().unwrap();
    for doc in [docs.swagger().unwrap(), docs.openapi().unwrap()] {
        let methods = doc["paths"]["/pets"].as_object().unwrap();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods["get"]["summary"], "List pets again");
    }
}

#[test]
fn test_body_on_get_leaves_documents_untouched() {
    let mut builder = petstore();
    let before = (
        builder.swagger().unwrap().to_json().unwrap(),
        builder.openapi().unwrap().to_json().unwrap(),
    );

    let route = RouteRegistration::new(HttpMethod::Get, Resource::of::<()>("/search"))
        .with_body_of::<Pet>();
    let err = builder.register(route, Metadata::summary("search")).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Method type GET does not support a body parameter (route '/search')"
    );
    assert!(matches!(err, AppError::BodyNotAllowed { .. }));

    let after = (
        builder.swagger().unwrap().to_json().unwrap(),
        builder.openapi().unwrap().to_json().unwrap(),
    );
    assert_eq!(before, after);
}

#[test]
fn test_served_documents() {
    let docs: ApiDocs = petstore().build().unwrap();

    match docs.route("/apidocs/openapi.json", None) {
        Served::Json(doc) => assert_eq!(Some(doc.as_ref()), docs.openapi()),
        other => panic!("unexpected {:?}", other),
    }
    match docs.route("/apidocs/swagger.json", None) {
        Served::Json(doc) => assert_eq!(doc["swagger"], "2.0"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(
        docs.route("/apidocs", None),
        Served::Redirect("/apidocs/index.html".to_string())
    );
    assert_eq!(docs.route("/apidocs/index.html", None), Served::NotFound);
}
