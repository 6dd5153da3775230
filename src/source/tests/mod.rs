mod natural_sort_tests;
mod playback_tests;
