//! Типы данных, общие для backend и клиентов табло

pub mod dashboards;
pub mod domain;
pub mod usecases;
