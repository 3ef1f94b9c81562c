/// Layer-selection rule table and layer plans.
pub mod plan;
