// Fixed text used when composing the user message.

/// Separates the instruction text from the serialized brief.
pub const INSTRUCTION_SEPARATOR: &str = "\n\n";

/// Header line placed directly above the serialized brief.
pub const BRIEF_HEADER: &str = "Product Brief:";
