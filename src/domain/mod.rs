pub mod hafalan;
