/**
 * This module contains all logic for loading models from external files.
 */
pub mod vox;
