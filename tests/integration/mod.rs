//! Integration tests for the campaign generation pipeline

mod asset_library;
mod end_to_end;
mod mock_fallback;
mod packaging;
mod properties;
