pub mod use_certificates;
