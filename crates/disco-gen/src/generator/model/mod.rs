mod definition;
mod node;

pub use definition::{ModelDefinition, ModelOrigin};
pub use node::{EnumValueDef, PrimitiveType, PropertyDef, SchemaNode};
