//! EIP-712 Type and Data Encoding
//!
//! Type-dependency resolution, canonical type signatures and recursive
//! struct encoding. Any deviation from the ordering or concatenation rules
//! here produces a different, valid-looking digest.

use super::types::{Eip712Error, TypeDefinitions, TypedDataField};
use crate::abi;
use crate::utils::crypto::keccak256;
use std::borrow::Cow;
use std::collections::HashSet;

/// Collect every struct type reachable from `primary_type`, itself first.
///
/// Depth-first traversal in first-discovery order. Primitive type names
/// have no entry in `types` and are never recorded. The visited set is
/// kept separate from the result list so cyclic or self-referential type
/// definitions terminate without dropping any reachable dependency.
pub fn dependencies(primary_type: &str, types: &TypeDefinitions) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    collect_dependencies(primary_type, types, &mut seen, &mut order);
    order
}

fn collect_dependencies(
    type_name: &str,
    types: &TypeDefinitions,
    seen: &mut HashSet<String>,
    order: &mut Vec<String>,
) {
    if seen.contains(type_name) {
        return;
    }
    let fields = match types.get(type_name) {
        Some(fields) => fields,
        None => return,
    };

    seen.insert(type_name.to_string());
    order.push(type_name.to_string());

    for field in fields {
        collect_dependencies(&field.type_name, types, seen, order);
    }
}

/// Build the canonical type signature for a struct type.
///
/// The primary type comes first; the remaining dependencies follow in
/// byte-wise lexicographic order. Each type renders as
/// `Name(type1 name1,type2 name2,...)` with its fields in declaration
/// order, and the segments concatenate with no separator.
pub fn encode_type(primary_type: &str, types: &TypeDefinitions) -> Result<String, Eip712Error> {
    let mut deps = dependencies(primary_type, types);
    if deps.is_empty() {
        return Err(Eip712Error::UnknownType(primary_type.to_string()));
    }

    let mut rest = deps.split_off(1);
    rest.sort();

    let mut result = String::new();
    for name in deps.iter().chain(rest.iter()) {
        if let Some(fields) = types.get(name) {
            result.push_str(&format_type(name, fields));
        }
    }
    Ok(result)
}

/// Render a single `Name(type1 name1,...)` segment
fn format_type(type_name: &str, fields: &[TypedDataField]) -> String {
    let params: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.type_name, f.name))
        .collect();

    format!("{}({})", type_name, params.join(","))
}

/// Hash of the canonical type signature
pub fn type_hash(primary_type: &str, types: &TypeDefinitions) -> Result<[u8; 32], Eip712Error> {
    let encoded = encode_type(primary_type, types)?;
    Ok(keccak256(encoded.as_bytes()))
}

/// Encode a struct value: type hash followed by one 32-byte slot per field.
///
/// Fields encode in declaration order. A field whose declared type is
/// itself defined in `types` recurses and contributes the hash of the
/// nested encoding; every other field contributes its primitive codec
/// slot. Output length is always `32 * (1 + field_count)`.
pub fn encode_data(
    primary_type: &str,
    data: &serde_json::Value,
    types: &TypeDefinitions,
) -> Result<Vec<u8>, Eip712Error> {
    let fields = types
        .get(primary_type)
        .ok_or_else(|| Eip712Error::UnknownType(primary_type.to_string()))?;
    let object = data.as_object().ok_or_else(|| Eip712Error::InvalidValue {
        type_name: primary_type.to_string(),
        value: data.to_string(),
    })?;

    let mut encoded = Vec::with_capacity(32 * (1 + fields.len()));
    encoded.extend_from_slice(&type_hash(primary_type, types)?);

    for field in fields {
        let value = object.get(&field.name).ok_or_else(|| {
            Eip712Error::MissingField(format!("{}.{}", primary_type, field.name))
        })?;

        if types.contains_key(&field.type_name) {
            let nested = encode_data(&field.type_name, value, types)?;
            encoded.extend_from_slice(&keccak256(&nested));
        } else {
            let leaf = leaf_text(&field.type_name, value)?;
            encoded.extend_from_slice(&abi::encode_field(&field.type_name, &leaf)?);
        }
    }

    Ok(encoded)
}

/// Read a primitive leaf as text.
///
/// JSON numbers and booleans are accepted in their canonical rendering so
/// documents with a numeric `chainId` or boolean flags hash directly.
fn leaf_text<'a>(
    type_name: &str,
    value: &'a serde_json::Value,
) -> Result<Cow<'a, str>, Eip712Error> {
    match value {
        serde_json::Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        serde_json::Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Cow::Owned(b.to_string())),
        _ => Err(Eip712Error::InvalidValue {
            type_name: type_name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod encoder_tests {
    use super::*;
    use crate::eip712::types::TypedDataField;
    use std::collections::HashMap;

    fn person_types() -> TypeDefinitions {
        let mut types = HashMap::new();
        types.insert(
            "Person".to_string(),
            vec![
                TypedDataField::new("name", "string"),
                TypedDataField::new("wallet", "address"),
            ],
        );
        types
    }

    fn mail_types() -> TypeDefinitions {
        let mut types = person_types();
        types.insert(
            "Mail".to_string(),
            vec![
                TypedDataField::new("from", "Person"),
                TypedDataField::new("to", "Person"),
                TypedDataField::new("contents", "string"),
            ],
        );
        types
    }

    #[test]
    fn test_dependencies_primary_first() {
        let deps = dependencies("Mail", &mail_types());
        assert_eq!(deps, ["Mail", "Person"]);
    }

    #[test]
    fn test_dependencies_of_primitive_are_empty() {
        assert!(dependencies("string", &mail_types()).is_empty());
        assert!(dependencies("Nope", &mail_types()).is_empty());
    }

    #[test]
    fn test_dependencies_terminate_on_cycles() {
        let mut types = HashMap::new();
        types.insert(
            "Node".to_string(),
            vec![
                TypedDataField::new("value", "uint256"),
                TypedDataField::new("next", "Node"),
            ],
        );
        types.insert(
            "Left".to_string(),
            vec![TypedDataField::new("other", "Right")],
        );
        types.insert(
            "Right".to_string(),
            vec![TypedDataField::new("other", "Left")],
        );

        assert_eq!(dependencies("Node", &types), ["Node"]);
        assert_eq!(dependencies("Left", &types), ["Left", "Right"]);
        assert_eq!(dependencies("Right", &types), ["Right", "Left"]);
    }

    #[test]
    fn test_encode_type_simple() {
        let encoded = encode_type("Person", &person_types()).unwrap();
        assert_eq!(encoded, "Person(string name,address wallet)");
    }

    #[test]
    fn test_encode_type_with_dependencies() {
        let encoded = encode_type("Mail", &mail_types()).unwrap();
        assert_eq!(
            encoded,
            "Mail(Person from,Person to,string contents)Person(string name,address wallet)"
        );
    }

    #[test]
    fn test_encode_type_primary_stays_first() {
        // "Zoo" sorts after "Animal"; the primary type must still lead
        let mut types = HashMap::new();
        types.insert(
            "Zoo".to_string(),
            vec![TypedDataField::new("star", "Animal")],
        );
        types.insert(
            "Animal".to_string(),
            vec![TypedDataField::new("name", "string")],
        );

        let encoded = encode_type("Zoo", &types).unwrap();
        assert!(encoded.starts_with("Zoo(Animal star)"));
        assert!(encoded.ends_with("Animal(string name)"));
    }

    #[test]
    fn test_encode_type_sorts_dependencies() {
        let mut types = HashMap::new();
        types.insert(
            "Top".to_string(),
            vec![
                TypedDataField::new("b", "Beta"),
                TypedDataField::new("a", "Alpha"),
            ],
        );
        types.insert(
            "Beta".to_string(),
            vec![TypedDataField::new("x", "uint256")],
        );
        types.insert(
            "Alpha".to_string(),
            vec![TypedDataField::new("y", "uint256")],
        );

        // discovery order is Beta then Alpha; output order is alphabetical
        assert_eq!(
            encode_type("Top", &types).unwrap(),
            "Top(Beta b,Alpha a)Alpha(uint256 y)Beta(uint256 x)"
        );
    }

    #[test]
    fn test_encode_type_unknown_primary() {
        assert!(matches!(
            encode_type("Missing", &person_types()),
            Err(Eip712Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_field_order_changes_signature() {
        let mut reordered = HashMap::new();
        reordered.insert(
            "Person".to_string(),
            vec![
                TypedDataField::new("wallet", "address"),
                TypedDataField::new("name", "string"),
            ],
        );

        assert_ne!(
            encode_type("Person", &person_types()).unwrap(),
            encode_type("Person", &reordered).unwrap()
        );
    }

    #[test]
    fn test_encode_data_length() {
        let data = serde_json::json!({
            "name": "Bob",
            "wallet": "0x0000000000000000000000000000000000000001"
        });
        let encoded = encode_data("Person", &data, &person_types()).unwrap();
        assert_eq!(encoded.len(), 32 * (1 + 2));
    }

    #[test]
    fn test_encode_data_starts_with_type_hash() {
        let data = serde_json::json!({
            "name": "Bob",
            "wallet": "0x0000000000000000000000000000000000000001"
        });
        let types = person_types();
        let encoded = encode_data("Person", &data, &types).unwrap();
        assert_eq!(&encoded[..32], &type_hash("Person", &types).unwrap());
    }

    #[test]
    fn test_encode_data_missing_field() {
        let data = serde_json::json!({ "name": "Bob" });
        assert!(matches!(
            encode_data("Person", &data, &person_types()),
            Err(Eip712Error::MissingField(f)) if f == "Person.wallet"
        ));
    }

    #[test]
    fn test_encode_data_rejects_non_object() {
        let data = serde_json::json!("not a struct");
        assert!(matches!(
            encode_data("Person", &data, &person_types()),
            Err(Eip712Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_leaf_text_renders_numbers_and_bools() {
        assert_eq!(
            leaf_text("uint256", &serde_json::json!(42)).unwrap(),
            "42"
        );
        assert_eq!(leaf_text("bool", &serde_json::json!(true)).unwrap(), "true");
        assert!(leaf_text("string", &serde_json::json!(["array"])).is_err());
    }
}
