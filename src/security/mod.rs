/*!
 * Security Module
 *
 * Constant-time comparison shared by every component that compares secret
 * or authentication material, plus timing verification utilities.
 */

pub mod constant_time;

pub use constant_time::{
    constant_time_eq, verify_constant_time, ConstantTimeConfig, ConstantTimeResult,
};
