//! User-facing strings carried by terminal workflow states.

/// Attached to every emergency, insufficient-evidence, and completed result.
pub const DISCLAIMER: &str = "This analysis is educational decision support only and is not a \
medical diagnosis. The emergency screen is an advisory net that can miss serious conditions. \
Always consult a qualified healthcare professional, and seek emergency care for severe or \
worsening symptoms.";

pub const EMERGENCY: &str = "URGENT: Please seek immediate medical attention for these symptoms.";

pub const INCOMPLETE: &str = "Please provide the presenting complaint to continue.";

pub const NO_CANDIDATES: &str =
    "No matching remedies found. Please provide more detailed symptoms.";

pub const NEEDS_CLARIFICATION: &str = "Additional information needed for accurate prescription.";

pub const INSUFFICIENT_EVIDENCE: &str =
    "Unable to determine a clear remedy. Please consult a qualified homeopath.";
