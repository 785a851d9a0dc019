/*
 * Responsibility
 * - Public surface of the router-level middleware
 */
pub mod cors;
pub mod http;
