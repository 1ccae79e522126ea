/// Output contracts for the rendering collaborators: the tabular display
/// path and the statistics report. Both hand over plain data; layout and
/// styling stay on the rendering side.
pub mod report;
pub mod table;
