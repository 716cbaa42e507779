//! Integration tests for code-movie.


mod playback_test;
