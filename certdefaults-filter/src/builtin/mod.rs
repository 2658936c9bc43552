pub mod append_cert_defaults;
