mod protected;
