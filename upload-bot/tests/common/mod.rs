pub mod mock_context;
