pub mod shared {
    pub mod infrastructure {
        pub mod database;
        pub mod document_store;
    }
}

pub mod modules {
    pub mod resources {
        pub mod collection;
        pub mod errors;
        pub mod router;
        pub mod use_cases {
            pub mod create_resource {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_resources {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_resource {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod replace_resource {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_resource {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
