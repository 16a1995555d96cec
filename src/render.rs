//! Java source emission for reconstructed DTO definitions.
//!
//! Each top-level class becomes a source file of its own.
//! Classes nested under a field are emitted as `public static class` members
//! of the enclosing class, after its fields.
//! Invariant fields with no initial value are assigned by a constructor
//! taking them in declaration order.

use dtogen_core::{ClassDefinition, FieldDefinition};
use dtogen_sheet::{DtoDocument, DtoMeta};
use std::fmt::Write;

const INDENT: &str = "    ";

/// The source of a single generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DtoResource {
    /// Package of the class, empty for the default package.
    pub package_name: String,
    /// Simple name of the class.
    pub resource_name: String,
    /// Java source of the class.
    pub source: String,
}

/// Renders every top-level class of the document.
pub fn render(document: &DtoDocument) -> Vec<DtoResource> {
    document
        .definitions
        .iter()
        .map(|definition| DtoResource {
            package_name: document.meta.package_name.clone(),
            resource_name: definition.name().to_owned(),
            source: render_class(&document.meta, definition),
        })
        .collect()
}

fn render_class(meta: &DtoMeta, definition: &ClassDefinition) -> String {
    let mut source = String::new();
    if !meta.package_name.is_empty() {
        // Writing to a `String` cannot fail.
        let _ = writeln!(source, "package {};\n", meta.package_name);
    }
    let mut javadoc = Vec::new();
    if !definition.description().is_empty() {
        javadoc.push(definition.description().to_owned());
    }
    if !meta.creator.is_empty() || !meta.version.is_empty() {
        javadoc.push(String::new());
    }
    if !meta.creator.is_empty() {
        javadoc.push(format!("@author {}", meta.creator));
    }
    if !meta.version.is_empty() {
        javadoc.push(format!("@since {}", meta.version));
    }
    write_javadoc(&mut source, 0, &javadoc);
    write_class(&mut source, 0, "public class", definition);
    source
}

fn write_class(source: &mut String, depth: usize, modifiers: &str, definition: &ClassDefinition) {
    let indent = INDENT.repeat(depth);
    let _ = writeln!(source, "{indent}{modifiers} {} {{", definition.name());
    for field in definition.fields() {
        source.push('\n');
        write_field(source, depth + 1, field);
    }
    write_constructor(source, depth + 1, definition);
    for nested in definition
        .fields()
        .iter()
        .filter_map(FieldDefinition::nested)
        .flat_map(|group| group.iter())
    {
        source.push('\n');
        if !nested.description().is_empty() {
            write_javadoc(source, depth + 1, &[nested.description().to_owned()]);
        }
        write_class(source, depth + 1, "public static class", nested);
    }
    let _ = writeln!(source, "{indent}}}");
}

fn write_field(source: &mut String, depth: usize, field: &FieldDefinition) {
    if !field.description().is_empty() {
        write_javadoc(source, depth, &[field.description().to_owned()]);
    }
    let indent = INDENT.repeat(depth);
    let modifier = if field.is_invariant() {
        "private final"
    } else {
        "private"
    };
    let _ = write!(
        source,
        "{indent}{modifier} {} {}",
        field.data_type(),
        field.variable_name()
    );
    if !field.initial_value().is_empty() {
        let _ = write!(source, " = {}", field.initial_value());
    }
    source.push_str(";\n");
}

fn write_constructor(source: &mut String, depth: usize, definition: &ClassDefinition) {
    let assigned: Vec<&FieldDefinition> = definition
        .fields()
        .iter()
        .filter(|field| field.is_invariant() && field.initial_value().is_empty())
        .collect();
    if assigned.is_empty() {
        return;
    }
    let indent = INDENT.repeat(depth);
    let parameters = assigned
        .iter()
        .map(|field| format!("{} {}", field.data_type(), field.variable_name()))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        source,
        "\n{indent}public {}({parameters}) {{",
        definition.name()
    );
    for field in assigned {
        let name = field.variable_name();
        let _ = writeln!(source, "{indent}{INDENT}this.{name} = {name};");
    }
    let _ = writeln!(source, "{indent}}}");
}

fn write_javadoc(source: &mut String, depth: usize, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let indent = INDENT.repeat(depth);
    let _ = writeln!(source, "{indent}/**");
    for line in lines {
        if line.is_empty() {
            let _ = writeln!(source, "{indent} *");
        } else {
            let _ = writeln!(source, "{indent} * {line}");
        }
    }
    let _ = writeln!(source, "{indent} */");
}
