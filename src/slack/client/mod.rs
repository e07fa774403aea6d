pub mod chat_command;
