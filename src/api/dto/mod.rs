/*
 * Responsibility
 * - request / response の JSON 形 (camelCase)
 * - domain 型への変換は From / to_* で行う
 */
pub mod favorites;
pub mod login;
pub mod members;
pub mod subway;
