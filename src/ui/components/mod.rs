pub mod answer_field;
pub mod feedback;
pub mod mode_tabs;
pub mod progress_bar;
pub mod sentence_card;
pub mod stats_sidebar;
pub mod token_board;
