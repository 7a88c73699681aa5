mod mosaic;
mod storage;
